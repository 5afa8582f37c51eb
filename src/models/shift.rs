//! Shift template and shift instance models.
//!
//! A [`ShiftType`] is a per-day template loaded once per roster period;
//! a [`ShiftInstance`] is one concrete, dated occurrence of it. Instances
//! are identified by their position in the calendar's ordered sequence —
//! every bundle and constraint downstream refers to that index.
//!
//! # Reference
//! Burke et al. (2004), "The State of the Art of Nurse Rostering"

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Abbreviation stem of the night shift type.
///
/// Instances of this type start in the evening and end on the following
/// calendar date.
pub const NIGHT_ABBREVIATION: &str = "n";

/// A shift template: one entry per shift kind, expanded once per calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftType {
    /// Template name (e.g. "nacht").
    pub name: String,
    /// Short label stem (e.g. "n"); instance labels append an ordinal.
    pub abbreviation: String,
    /// Daily start time-of-day.
    pub start_time: NaiveTime,
    /// Daily end time-of-day. For night types this falls on the next date.
    pub end_time: NaiveTime,
    /// Headcount: how many instances to emit per day.
    pub count: u32,
}

impl ShiftType {
    /// Creates a new shift template.
    pub fn new(
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        start_time: NaiveTime,
        end_time: NaiveTime,
        count: u32,
    ) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
            start_time,
            end_time,
            count,
        }
    }

    /// Whether this is the night type (its end anchors to the next date).
    #[inline]
    pub fn is_night(&self) -> bool {
        self.abbreviation == NIGHT_ABBREVIATION
    }
}

/// One concrete, dated occurrence of a shift type.
///
/// Immutable after calendar expansion. Equality of two instances is
/// positional — downstream code compares indices, not contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftInstance {
    /// Derived name: `{type_name}_{ordinal}`.
    pub name: String,
    /// Slot label: `{abbreviation}{ordinal}` (e.g. `n0`, `n1`).
    pub label: String,
    /// Absolute start timestamp.
    pub start: NaiveDateTime,
    /// Absolute end timestamp (on the next date for night instances).
    pub end: NaiveDateTime,
}

impl ShiftInstance {
    /// Expands a template into its `ordinal`-th instance on `date`.
    pub fn from_type(ty: &ShiftType, ordinal: u32, date: NaiveDate) -> Self {
        let end_date = if ty.is_night() {
            date + Days::new(1)
        } else {
            date
        };
        Self {
            name: format!("{}_{}", ty.name, ordinal),
            label: format!("{}{}", ty.abbreviation, ordinal),
            start: date.and_time(ty.start_time),
            end: end_date.and_time(ty.end_time),
        }
    }

    /// Worked duration in hours (end − start).
    #[inline]
    pub fn work_hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }

    /// Calendar date the instance starts on.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Weekday the instance starts on.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.start.weekday()
    }

    /// Label with the trailing ordinal stripped (e.g. `n1` → `n`).
    pub fn stem(&self) -> &str {
        self.label.trim_end_matches(|c: char| c.is_ascii_digit())
    }

    /// Whether a rule's shift field refers to this instance.
    ///
    /// Matches either the full slot label (`n1`) or the bare stem (`n`,
    /// meaning every ordinal of that type).
    pub fn matches_abbrev(&self, abbrev: &str) -> bool {
        self.label == abbrev || self.stem() == abbrev
    }
}
