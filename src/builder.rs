//! Roster model builder: from domain objects to a solver-ready model and
//! back.
//!
//! [`RosterModelBuilder`] borrows the immutable inputs of one roster period
//! (staff, calendar, rules), builds the decision matrix and hands one
//! shared [`CpModel`] through every hard and soft emitter — the emitters
//! only append. [`RosterModelBuilder::decode`] is the roster materializer:
//! it reads the solved matrix back into a [`Roster`] and audits the
//! coverage contract on the way.
//!
//! Bundles are derived once per build and shared across emitters.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::bundles;
use crate::calendar::ShiftCalendar;
use crate::constraints::{hard, soft, BuildError, WorkMatrix};
use crate::cp::{CpModel, CpSolver, SolveOutcome, SolveStatus, SolverConfig};
use crate::models::{Nurse, Roster, RosterEntry, RosterRule};

/// A built model plus its decision matrix.
#[derive(Debug, Clone)]
pub struct RosterProblem {
    /// The constraint model handed to a solver.
    pub model: CpModel,
    /// The (nurse, shift instance) decision matrix.
    pub work: WorkMatrix,
}

/// Result of one solve, from the roster's point of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RosterOutcome {
    /// An assignment was found (optimal, or best-so-far on timeout).
    Solved {
        /// The materialized roster.
        roster: Roster,
        /// Whether the assignment is proven optimal.
        status: SolveStatus,
    },
    /// No assignment satisfies the hard constraints.
    Infeasible,
    /// The budget ran out before any assignment was found.
    Unknown,
}

/// Errors surfaced while building or decoding.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Rule translation failed.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The solver returned an assignment that breaks the coverage
    /// invariant — a solver bug, not a modeling bug.
    #[error("solver contract breach: shift instance {shift} covered by {count} nurses")]
    CoverageBreach {
        /// Offending shift instance index.
        shift: usize,
        /// Number of nurses assigned to it.
        count: usize,
    },

    /// The solver claimed a solution-bearing status without an assignment.
    #[error("solver reported {status:?} without an assignment")]
    MissingAssignment {
        /// Status the solver reported.
        status: SolveStatus,
    },
}

/// Builds the constraint model of one roster period.
pub struct RosterModelBuilder<'a> {
    nurses: &'a [Nurse],
    calendar: &'a ShiftCalendar,
    rules: &'a [RosterRule],
}

impl<'a> RosterModelBuilder<'a> {
    /// Creates a builder over one period's immutable inputs.
    pub fn new(nurses: &'a [Nurse], calendar: &'a ShiftCalendar, rules: &'a [RosterRule]) -> Self {
        Self {
            nurses,
            calendar,
            rules,
        }
    }

    /// Builds the full model: decision matrix, every hard constraint,
    /// every soft term.
    pub fn build(&self) -> Result<RosterProblem, BuildError> {
        let shifts = self.calendar.shifts();
        let days = bundles::day_bundles(shifts);
        let weeks = bundles::week_bundles(shifts);

        let mut model = CpModel::new();
        let work = WorkMatrix::build(&mut model, self.nurses.len(), shifts.len());

        hard::add_coverage(&mut model, &work);
        hard::add_one_shift_per_day(&mut model, &work, &days);
        hard::add_night_rest(&mut model, &work, shifts);
        hard::add_resuscitation_cover(&mut model, &work, self.nurses, &days, shifts);
        hard::add_weekly_shift_cap(&mut model, &work, &weeks);
        hard::add_rule_constraints(&mut model, &work, self.nurses, shifts, self.rules)?;

        soft::add_weekly_hours(&mut model, &work, self.nurses, shifts, &weeks);
        soft::add_transition_penalties(&mut model, &work, shifts);
        soft::add_min_run_length(&mut model, &work, shifts);
        soft::add_preference_penalties(&mut model, &work, self.nurses, shifts, self.rules)?;
        soft::add_whole_weekends(&mut model, &work, &days);
        soft::add_external_staff_cost(&mut model, &work, self.nurses);

        debug!(
            nurses = self.nurses.len(),
            shifts = shifts.len(),
            vars = model.var_count(),
            constraints = model.constraint_count(),
            cost_terms = model.cost_terms().len(),
            "roster model built"
        );

        Ok(RosterProblem { model, work })
    }

    /// Builds, solves and decodes in one call.
    pub fn solve<S: CpSolver>(
        &self,
        solver: &S,
        config: &SolverConfig,
    ) -> Result<RosterOutcome, RosterError> {
        let problem = self.build()?;
        let outcome = solver.solve(&problem.model, config);
        self.decode(&problem, &outcome)
    }

    /// Materializes a solver outcome into a roster.
    ///
    /// Infeasibility and an exhausted budget are valid outcomes, reported
    /// as their own variants. A returned assignment must cover every shift
    /// instance exactly once; anything else is a
    /// [`RosterError::CoverageBreach`].
    pub fn decode(
        &self,
        problem: &RosterProblem,
        outcome: &SolveOutcome,
    ) -> Result<RosterOutcome, RosterError> {
        match outcome.status {
            SolveStatus::Infeasible => return Ok(RosterOutcome::Infeasible),
            SolveStatus::Unknown => return Ok(RosterOutcome::Unknown),
            SolveStatus::Optimal | SolveStatus::Feasible => {}
        }
        let solution = outcome
            .solution
            .as_ref()
            .ok_or(RosterError::MissingAssignment {
                status: outcome.status,
            })?;

        let mut roster = Roster::new();
        for (s, shift) in self.calendar.shifts().iter().enumerate() {
            let assigned: Vec<usize> = (0..self.nurses.len())
                .filter(|&n| solution.value(problem.work.var(n, s)) == 1)
                .collect();
            if assigned.len() != 1 {
                return Err(RosterError::CoverageBreach {
                    shift: s,
                    count: assigned.len(),
                });
            }
            roster.push(RosterEntry {
                nurse: self.nurses[assigned[0]].name.clone(),
                shift_index: s,
                label: shift.label.clone(),
                start: shift.start,
            });
        }

        Ok(RosterOutcome::Solved {
            roster,
            status: outcome.status,
        })
    }
}
