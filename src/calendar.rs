//! Shift calendar expansion (Calendar Builder).
//!
//! Expands the ordered shift-type templates into the concrete shift-instance
//! sequence for one roster month: day-major, type-major within a day,
//! ordinal-major within a type (`n0` precedes `n1`). The sequence is
//! immutable after construction; instance index is identity for every
//! downstream bundle and constraint.
//!
//! Also owns the label vocabulary: the eight canonical slot labels and the
//! Dutch two-letter weekday tokens used by the request files.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{ShiftInstance, ShiftType};

/// The eight canonical slot labels of a fully staffed day, in calendar
/// order: two day variants, two late variants, two evening variants,
/// two night variants.
pub const SLOT_LABELS: [&str; 8] = ["dk0", "dm0", "dl0", "dl1", "a0", "a1", "n0", "n1"];

/// Night slot labels.
pub const NIGHT_LABELS: [&str; 2] = ["n0", "n1"];

/// Labels that may not follow a worked night (day and evening slots).
pub const DAY_EVENING_LABELS: [&str; 6] = ["dk0", "dm0", "dl0", "dl1", "a0", "a1"];

/// Same-day slot pairs that need resuscitation cover (late, evening, night).
pub const RESUSCITATION_PAIRS: [(&str, &str); 3] = [("dl0", "dl1"), ("a0", "a1"), ("n0", "n1")];

/// Parses a Dutch two-letter weekday token (`ma`..`zo`).
pub fn weekday_from_label(label: &str) -> Option<Weekday> {
    match label {
        "ma" => Some(Weekday::Mon),
        "di" => Some(Weekday::Tue),
        "wo" => Some(Weekday::Wed),
        "do" => Some(Weekday::Thu),
        "vr" => Some(Weekday::Fri),
        "za" => Some(Weekday::Sat),
        "zo" => Some(Weekday::Sun),
        _ => None,
    }
}

/// The concrete shift calendar of one roster month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCalendar {
    /// Roster year.
    pub year: i32,
    /// Roster month (1..=12).
    pub month: u32,
    /// Templates the calendar was expanded from, in input order.
    pub types: Vec<ShiftType>,
    shifts: Vec<ShiftInstance>,
}

impl ShiftCalendar {
    /// Expands templates into the month's ordered instance sequence.
    ///
    /// For every day of the month and every template, emits `count`
    /// instances labeled `{abbrev}{ordinal}`. Night instances end on the
    /// following date (which may fall in the next month).
    ///
    /// Returns `None` for an invalid (year, month).
    pub fn build(types: Vec<ShiftType>, year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;

        let mut shifts = Vec::new();
        let mut date = first;
        while date.month() == month && date.year() == year {
            for ty in &types {
                for ordinal in 0..ty.count {
                    shifts.push(ShiftInstance::from_type(ty, ordinal, date));
                }
            }
            date = date + Days::new(1);
        }

        Some(Self {
            year,
            month,
            types,
            shifts,
        })
    }

    /// The ordered shift-instance sequence.
    #[inline]
    pub fn shifts(&self) -> &[ShiftInstance] {
        &self.shifts
    }

    /// Instance at a sequence index.
    #[inline]
    pub fn shift(&self, index: usize) -> &ShiftInstance {
        &self.shifts[index]
    }

    /// Number of shift instances in the month.
    #[inline]
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    /// Whether the calendar is empty (no templates).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Number of calendar days in the roster month.
    pub fn days_in_month(&self) -> u32 {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("calendar was built from a valid (year, month)");
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        }
        .expect("valid successor month");
        (next - first).num_days() as u32
    }
}
