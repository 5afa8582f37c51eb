//! Nurse (staff) model.
//!
//! A nurse is identified by name and carries the contract and certification
//! data the constraint libraries need: weekly contract hours (the soft
//! target for hour balancing), skill level, and the external-staff,
//! supervisor and resuscitation flags.

use serde::{Deserialize, Serialize};

/// A staff member who can be assigned to shift instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nurse {
    /// Unique name (the roster file's key).
    pub name: String,
    /// Weekly contract-hour target.
    pub contract_hours: f64,
    /// Skill level (ward-defined ordinal scale).
    pub level: i32,
    /// Externally contracted / flexible staff ("zzp").
    pub external: bool,
    /// Supervising (head) nurse.
    pub head_nurse: bool,
    /// Certified for resuscitation.
    pub resuscitation: bool,
}

impl Nurse {
    /// Creates a nurse with the given name and contract hours.
    pub fn new(name: impl Into<String>, contract_hours: f64) -> Self {
        Self {
            name: name.into(),
            contract_hours,
            level: 0,
            external: false,
            head_nurse: false,
            resuscitation: false,
        }
    }

    /// Sets the skill level.
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Marks the nurse as external / flexible staff.
    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }

    /// Marks the nurse as a head nurse.
    pub fn head_nurse(mut self) -> Self {
        self.head_nurse = true;
        self
    }

    /// Marks the nurse as resuscitation-certified.
    pub fn resuscitation(mut self) -> Self {
        self.resuscitation = true;
        self
    }
}
