//! Roster (solution) model.
//!
//! A roster is the read-back of a solved decision matrix: one entry per
//! (nurse, shift-instance) cell the solver set, in shift-sequence order.
//! By construction of the coverage constraint every shift instance appears
//! in exactly one entry; the decode step verifies that before a roster is
//! handed to presentation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One assigned (nurse, shift instance) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Assigned nurse name.
    pub nurse: String,
    /// Index of the shift instance in the calendar sequence.
    pub shift_index: usize,
    /// Slot label of the instance (denormalized for presentation).
    pub label: String,
    /// Start timestamp of the instance (denormalized for presentation).
    pub start: NaiveDateTime,
}

/// A complete solved roster for one period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Entries in shift-sequence order.
    pub entries: Vec<RosterEntry>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: RosterEntry) {
        self.entries.push(entry);
    }

    /// Number of assigned cells.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries assigned to a nurse, in shift order.
    pub fn entries_for_nurse(&self, nurse: &str) -> Vec<&RosterEntry> {
        self.entries.iter().filter(|e| e.nurse == nurse).collect()
    }

    /// The nurse covering a shift instance, if any.
    pub fn nurse_for_shift(&self, shift_index: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.shift_index == shift_index)
            .map(|e| e.nurse.as_str())
    }
}
