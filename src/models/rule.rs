//! Roster rule (request) model and its classification.
//!
//! A [`RosterRule`] is one raw request-file record: every field optional,
//! loaded in input order, never merged. Which constraint a rule produces is
//! decided by [`RosterRule::classify`], an explicit, exhaustive mapping from
//! the populated-field pattern to a [`RuleKind`]. Records whose populated
//! fields match no kind are rejected loudly instead of silently dropping
//! data; fully blank records stay [`RuleKind::Inert`] (request files contain
//! placeholder lines).

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One raw request record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterRule {
    /// Subject nurse name.
    pub nurse: Option<String>,
    /// Absolute date the rule applies to.
    pub date: Option<NaiveDate>,
    /// Recurring weekday the rule applies to.
    pub weekday: Option<Weekday>,
    /// Shift label (`n1`) or bare type stem (`n`).
    pub shift: Option<String>,
    /// `true` = assign, `false` = forbid.
    pub assign: Option<bool>,
    /// Minimum streak length (parsed, not consumed by any current kind).
    pub streak_min: Option<u32>,
    /// Maximum streak length before a forced rest day.
    pub streak_max: Option<u32>,
    /// Aggregate bound (parsed, not consumed by any current kind).
    pub max_total: Option<u32>,
    /// `true` = hard rule, `false`/absent = soft.
    pub hard: Option<bool>,
}

/// The constraint family a classified rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    /// Hard: force the nurse onto (or off) the matching instance(s) of one
    /// exact date.
    ExactDate,
    /// Hard: assign/forbid every occurrence of one weekday in the period.
    WeekdayRecurring,
    /// Hard: the nurse never works the named shift type.
    ShiftTypeExclusion,
    /// Hard: no work on the day after a streak of `streak_max` worked days.
    StreakRest,
    /// Soft: penalized (dis)preference for a shift label.
    SoftPreference,
    /// All diagnostic fields blank; emits nothing.
    Inert,
}

/// A populated record that matches no rule kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("rule cannot be classified: {rule}")]
pub struct UnclassifiableRule {
    /// Display form of the offending record.
    pub rule: String,
}

impl RosterRule {
    /// Creates a blank (inert) rule; populate via struct update or setters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the subject nurse.
    pub fn for_nurse(mut self, name: impl Into<String>) -> Self {
        self.nurse = Some(name.into());
        self
    }

    /// Sets the absolute date.
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the recurring weekday.
    pub fn on_weekday(mut self, weekday: Weekday) -> Self {
        self.weekday = Some(weekday);
        self
    }

    /// Sets the shift label or stem.
    pub fn for_shift(mut self, shift: impl Into<String>) -> Self {
        self.shift = Some(shift.into());
        self
    }

    /// Sets the assign/forbid flag.
    pub fn assigning(mut self, assign: bool) -> Self {
        self.assign = Some(assign);
        self
    }

    /// Sets the maximum streak length.
    pub fn with_streak_max(mut self, streak_max: u32) -> Self {
        self.streak_max = Some(streak_max);
        self
    }

    /// Marks the rule hard.
    pub fn hard(mut self) -> Self {
        self.hard = Some(true);
        self
    }

    /// Whether the hard flag is set.
    #[inline]
    pub fn is_hard(&self) -> bool {
        self.hard == Some(true)
    }

    /// Assign/forbid flag, defaulting to assign.
    #[inline]
    pub fn wants_assignment(&self) -> bool {
        self.assign.unwrap_or(true)
    }

    /// Whether every diagnostic field is blank.
    fn is_blank(&self) -> bool {
        self.nurse.is_none()
            && self.date.is_none()
            && self.weekday.is_none()
            && self.shift.is_none()
            && self.assign.is_none()
            && self.streak_min.is_none()
            && self.streak_max.is_none()
            && self.max_total.is_none()
            && self.hard.is_none()
    }

    /// Classifies the record by its populated-field pattern.
    ///
    /// The predicates are mutually exclusive by construction (each pair
    /// differs on a required-present vs required-absent field), so a record
    /// matches exactly one kind or none. A fully blank record is
    /// [`RuleKind::Inert`]; any other non-match is an error.
    pub fn classify(&self) -> Result<RuleKind, UnclassifiableRule> {
        if self.is_blank() {
            return Ok(RuleKind::Inert);
        }
        if self.date.is_some() && self.weekday.is_none() && self.is_hard() {
            return Ok(RuleKind::ExactDate);
        }
        if self.weekday.is_some() && self.date.is_none() && self.is_hard() {
            return Ok(RuleKind::WeekdayRecurring);
        }
        if self.shift.is_some()
            && self.is_hard()
            && self.assign == Some(false)
            && self.date.is_none()
            && self.weekday.is_none()
        {
            return Ok(RuleKind::ShiftTypeExclusion);
        }
        if self.streak_max.is_some()
            && self.is_hard()
            && self.date.is_none()
            && self.weekday.is_none()
            && self.shift.is_none()
        {
            return Ok(RuleKind::StreakRest);
        }
        if self.shift.is_some() && !self.is_hard() {
            return Ok(RuleKind::SoftPreference);
        }
        Err(UnclassifiableRule {
            rule: self.to_string(),
        })
    }
}

impl fmt::Display for RosterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name:{:?} date:{:?} day:{:?} shift:{:?} assign:{:?} streak:{:?}..{:?} max:{:?} hard:{:?}",
            self.nurse,
            self.date,
            self.weekday,
            self.shift,
            self.assign,
            self.streak_min,
            self.streak_max,
            self.max_total,
            self.hard,
        )
    }
}
