//! Input validation for a roster period.
//!
//! Checks structural integrity of nurses, calendar and rules before any
//! model construction. Detects:
//! - Duplicate nurse names
//! - Rules referencing unknown nurses
//! - Rules referencing shift labels absent from the calendar
//! - Streak lengths outside the supported window range
//! - Populated rule records that match no rule kind
//!
//! All problems are collected and reported together, so a bad request file
//! surfaces every offending line in one pass.

use std::collections::HashSet;

use crate::calendar::ShiftCalendar;
use crate::models::{Nurse, RosterRule, RuleKind};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two nurses share a name.
    DuplicateNurse,
    /// A rule names a nurse absent from the roster.
    UnknownNurse,
    /// A rule names a shift label or stem the calendar never produces.
    UnknownShift,
    /// A streak-rest rule asks for a window outside 2..=5.
    StreakOutOfRange,
    /// A populated rule matches no rule kind.
    UnclassifiableRule,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates one period's inputs.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_input(
    nurses: &[Nurse],
    calendar: &ShiftCalendar,
    rules: &[RosterRule],
) -> ValidationResult {
    let mut errors = Vec::new();

    // Nurse names must be unique (the name is the roster key).
    let mut names = HashSet::new();
    for nurse in nurses {
        if !names.insert(nurse.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateNurse,
                format!("Duplicate nurse name: {}", nurse.name),
            ));
        }
    }

    // Every label and stem the calendar can produce.
    let mut known_shifts: HashSet<&str> = HashSet::new();
    for shift in calendar.shifts() {
        known_shifts.insert(shift.label.as_str());
        known_shifts.insert(shift.stem());
    }

    for (i, rule) in rules.iter().enumerate() {
        match rule.classify() {
            Ok(RuleKind::Inert) => continue,
            Ok(kind) => {
                if let Some(name) = &rule.nurse {
                    if !names.contains(name.as_str()) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::UnknownNurse,
                            format!("Rule {i} references unknown nurse '{name}'"),
                        ));
                    }
                }
                if let Some(shift) = &rule.shift {
                    if !known_shifts.contains(shift.as_str()) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::UnknownShift,
                            format!("Rule {i} references unknown shift '{shift}'"),
                        ));
                    }
                }
                if kind == RuleKind::StreakRest {
                    let len = rule.streak_max.unwrap_or(0);
                    if !(2..=5).contains(&len) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::StreakOutOfRange,
                            format!(
                                "Rule {i} asks for streak length {len}, supported range is 2..=5"
                            ),
                        ));
                    }
                }
            }
            Err(err) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnclassifiableRule,
                    format!("Rule {i}: {err}"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
