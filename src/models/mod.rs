//! Rostering domain models.
//!
//! Core data types for one roster period: shift templates and their dated
//! instances, staff, raw request rules with explicit classification, and
//! the solved roster. All types are immutable after loading; model building
//! only reads them.
//!
//! | ward-roster | Generic scheduling |
//! |-------------|--------------------|
//! | ShiftInstance | Activity / time slot |
//! | Nurse | Resource (human) |
//! | RosterRule | Constraint record |
//! | Roster | Schedule (solution) |

mod nurse;
mod roster;
mod rule;
mod shift;

pub use nurse::Nurse;
pub use roster::{Roster, RosterEntry};
pub use rule::{RosterRule, RuleKind, UnclassifiableRule};
pub use shift::{ShiftInstance, ShiftType, NIGHT_ABBREVIATION};
