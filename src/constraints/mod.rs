//! Hard and soft constraint libraries.
//!
//! Both libraries append to one shared [`CpModel`](crate::cp::CpModel):
//! the hard library emits non-negotiable constraints over the decision
//! matrix, the soft library emits penalty variables and their weights into
//! the objective. Neither owns state — the builder hands each emitter the
//! model, the [`WorkMatrix`] and the inputs it needs.

pub mod hard;
pub mod soft;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cp::{CpModel, VarId, VarTag};
use crate::models::UnclassifiableRule;

/// The boolean decision matrix: `work[n][s]` = 1 iff nurse `n` works shift
/// instance `s`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkMatrix {
    vars: Vec<Vec<VarId>>,
}

impl WorkMatrix {
    /// Creates one tagged 0/1 variable per (nurse, shift instance) cell.
    pub fn build(model: &mut CpModel, nurse_count: usize, shift_count: usize) -> Self {
        let vars = (0..nurse_count)
            .map(|nurse| {
                (0..shift_count)
                    .map(|shift| model.new_bool_var(VarTag::Work { nurse, shift }))
                    .collect()
            })
            .collect();
        Self { vars }
    }

    /// The decision variable of one cell.
    #[inline]
    pub fn var(&self, nurse: usize, shift: usize) -> VarId {
        self.vars[nurse][shift]
    }

    /// All of one nurse's cells, in shift-sequence order.
    #[inline]
    pub fn nurse_row(&self, nurse: usize) -> &[VarId] {
        &self.vars[nurse]
    }

    /// Number of nurses.
    pub fn nurse_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of shift instances.
    pub fn shift_count(&self) -> usize {
        self.vars.first().map_or(0, |row| row.len())
    }
}

/// Errors raised while translating rules into constraints.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A rule names a nurse absent from the roster.
    #[error("rule references unknown nurse '{0}'")]
    UnknownNurse(String),

    /// A streak-rest rule asks for an unsupported window length.
    #[error("streak length {0} outside supported range 2..=5")]
    StreakOutOfRange(u32),

    /// A populated rule record matches no rule kind.
    #[error(transparent)]
    Unclassifiable(#[from] UnclassifiableRule),
}

/// Resolves a rule's subject to a nurse index.
pub(crate) fn nurse_index(nurses: &[crate::models::Nurse], name: &str) -> Result<usize, BuildError> {
    nurses
        .iter()
        .position(|n| n.name == name)
        .ok_or_else(|| BuildError::UnknownNurse(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_matrix_tags() {
        let mut model = CpModel::new();
        let work = WorkMatrix::build(&mut model, 2, 3);

        assert_eq!(work.nurse_count(), 2);
        assert_eq!(work.shift_count(), 3);
        assert_eq!(model.var_count(), 6);
        assert_eq!(
            model.tag(work.var(1, 2)),
            VarTag::Work { nurse: 1, shift: 2 }
        );
        assert_eq!(model.bounds(work.var(0, 0)), (0, 1));
    }

    #[test]
    fn test_nurse_index_lookup() {
        let nurses = vec![
            crate::models::Nurse::new("Alice", 36.0),
            crate::models::Nurse::new("Bob", 24.0),
        ];
        assert_eq!(nurse_index(&nurses, "Bob").unwrap(), 1);
        assert!(matches!(
            nurse_index(&nurses, "Zoe"),
            Err(BuildError::UnknownNurse(_))
        ));
    }
}
