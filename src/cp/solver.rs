//! Solver boundary: the trait a real CP solver implements, plus a small
//! exhaustive reference solver.
//!
//! The rostering core treats search as a single blocking call with an
//! externally imposed time budget. A solver receives the finished
//! [`CpModel`] and answers with a [`SolveOutcome`]: a status in
//! {optimal, feasible, infeasible, unknown} and, when one exists, a full
//! variable assignment.
//!
//! [`ExhaustiveSolver`] is a depth-first branch-and-prune enumeration with
//! equality propagation. It is exact but exponential — meant for tiny
//! models (tests, documentation examples), not for production periods.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CpConstraint, CpModel, LinearConstraint, VarId};

/// Solve-time limits handed to a solver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock budget in milliseconds. `None` = unlimited.
    pub time_limit_ms: Option<u64>,
}

impl SolverConfig {
    /// Creates an unlimited configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit_ms(mut self, limit: u64) -> Self {
        self.time_limit_ms = Some(limit);
        self
    }
}

/// Terminal status of a solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Proven objective-minimal assignment.
    Optimal,
    /// Feasible assignment found, optimality not proven (budget hit).
    Feasible,
    /// No assignment satisfies the hard constraints.
    Infeasible,
    /// Budget hit before any feasible assignment was found.
    Unknown,
}

/// A full variable assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    values: Vec<i64>,
}

impl Solution {
    /// Wraps a value vector (index-aligned with the model's variables).
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    /// Value assigned to a variable.
    #[inline]
    pub fn value(&self, var: VarId) -> i64 {
        self.values[var.index()]
    }

    /// The raw value vector.
    #[inline]
    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

/// Status plus (when found) assignment and objective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveOutcome {
    /// Terminal status.
    pub status: SolveStatus,
    /// Assignment, present for `Optimal` and `Feasible`.
    pub solution: Option<Solution>,
    /// Objective value of the assignment, when present.
    pub objective: Option<i64>,
}

impl SolveOutcome {
    /// Whether an assignment was produced.
    pub fn is_solution_found(&self) -> bool {
        self.solution.is_some()
    }
}

/// The opaque search boundary.
///
/// Implementations own parallelism, restarts, and cancellation; the core
/// only observes the blocking call and its outcome.
pub trait CpSolver {
    /// Searches for a feasible, objective-minimizing assignment.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> SolveOutcome;
}

/// Exact reference solver: DFS over variable domains with equality
/// propagation and objective-bound pruning.
#[derive(Debug, Clone)]
pub struct ExhaustiveSolver {
    var_limit: usize,
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self { var_limit: 64 }
    }
}

impl ExhaustiveSolver {
    /// Creates a solver refusing models above the default variable limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises or lowers the accepted model size.
    pub fn with_var_limit(mut self, var_limit: usize) -> Self {
        self.var_limit = var_limit;
        self
    }
}

impl CpSolver for ExhaustiveSolver {
    /// # Panics
    /// Panics if the model has more variables than the configured limit;
    /// this solver exists for tiny models only.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> SolveOutcome {
        assert!(
            model.var_count() <= self.var_limit,
            "model with {} variables exceeds the exhaustive solver limit {}",
            model.var_count(),
            self.var_limit
        );

        let deadline = config
            .time_limit_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));
        let mut search = Search {
            model,
            deadline,
            best: None,
            interrupted: false,
        };
        search.dfs(vec![None; model.var_count()]);

        debug!(
            vars = model.var_count(),
            constraints = model.constraint_count(),
            interrupted = search.interrupted,
            "exhaustive search finished"
        );

        match (search.best, search.interrupted) {
            (Some((objective, values)), interrupted) => SolveOutcome {
                status: if interrupted {
                    SolveStatus::Feasible
                } else {
                    SolveStatus::Optimal
                },
                solution: Some(Solution::new(values)),
                objective: Some(objective),
            },
            (None, true) => SolveOutcome {
                status: SolveStatus::Unknown,
                solution: None,
                objective: None,
            },
            (None, false) => SolveOutcome {
                status: SolveStatus::Infeasible,
                solution: None,
                objective: None,
            },
        }
    }
}

struct Search<'a> {
    model: &'a CpModel,
    deadline: Option<Instant>,
    best: Option<(i64, Vec<i64>)>,
    interrupted: bool,
}

impl Search<'_> {
    fn dfs(&mut self, mut values: Vec<Option<i64>>) {
        if self.interrupted {
            return;
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.interrupted = true;
                return;
            }
        }
        if !propagate(self.model, &mut values) {
            return;
        }
        if let Some((best, _)) = &self.best {
            if objective_lower_bound(self.model, &values) >= *best {
                return;
            }
        }

        match values.iter().position(|v| v.is_none()) {
            None => {
                let full: Vec<i64> = values
                    .iter()
                    .map(|v| v.expect("branching assigned every variable"))
                    .collect();
                if self.model.is_feasible(&full) {
                    let objective = self.model.objective_value(&full);
                    if self.best.as_ref().map_or(true, |(b, _)| objective < *b) {
                        self.best = Some((objective, full));
                    }
                }
            }
            Some(next) => {
                let (lo, hi) = self.model.bounds(VarId::from_index(next));
                for v in lo..=hi {
                    let mut child = values.clone();
                    child[next] = Some(v);
                    self.dfs(child);
                }
            }
        }
    }
}

/// Fixpoint propagation of forced values. Returns `false` on conflict.
fn propagate(model: &CpModel, values: &mut [Option<i64>]) -> bool {
    loop {
        let mut changed = false;
        for constraint in model.constraints() {
            let ok = match constraint {
                CpConstraint::Linear(lc) => propagate_linear(model, lc, values, &mut changed),
                CpConstraint::Implication { conditions, then } => {
                    match conjunction_state(conditions, values) {
                        Some(true) => propagate_linear(model, then, values, &mut changed),
                        // False or not yet decided: nothing to enforce.
                        _ => true,
                    }
                }
                CpConstraint::MaxOfZero { target, expr } => {
                    propagate_max(model, *target, expr, values, &mut changed)
                }
            };
            if !ok {
                return false;
            }
        }
        if !changed {
            return true;
        }
    }
}

fn conjunction_state(conditions: &[VarId], values: &[Option<i64>]) -> Option<bool> {
    let mut all_true = true;
    for c in conditions {
        match values[c.index()] {
            Some(0) => return Some(false),
            Some(_) => {}
            None => all_true = false,
        }
    }
    if all_true {
        Some(true)
    } else {
        None
    }
}

/// Evaluates an expression over a partial assignment: (sum of assigned
/// part, the single unassigned term if exactly one, count of unassigned).
fn partial_value(
    expr: &super::LinExpr,
    values: &[Option<i64>],
) -> (i64, Option<(VarId, i64)>, usize) {
    let mut acc = expr.constant();
    let mut unassigned = None;
    let mut missing = 0usize;
    for &(var, coef) in expr.terms() {
        match values[var.index()] {
            Some(v) => acc += coef * v,
            None => {
                missing += 1;
                unassigned = Some((var, coef));
            }
        }
    }
    (acc, unassigned, missing)
}

fn propagate_linear(
    model: &CpModel,
    lc: &LinearConstraint,
    values: &mut [Option<i64>],
    changed: &mut bool,
) -> bool {
    let (acc, unassigned, missing) = partial_value(&lc.expr, values);
    match missing {
        0 => lc.min <= acc && acc <= lc.max,
        1 if lc.min == lc.max => {
            let (var, coef) = unassigned.expect("exactly one unassigned term");
            let remainder = lc.min - acc;
            if remainder % coef != 0 {
                return false;
            }
            assign(model, var, remainder / coef, values, changed)
        }
        _ => true,
    }
}

fn propagate_max(
    model: &CpModel,
    target: VarId,
    expr: &super::LinExpr,
    values: &mut [Option<i64>],
    changed: &mut bool,
) -> bool {
    let (acc, _, missing) = partial_value(expr, values);
    if missing > 0 {
        return true;
    }
    let forced = acc.max(0);
    match values[target.index()] {
        Some(v) => v == forced,
        None => assign(model, target, forced, values, changed),
    }
}

fn assign(
    model: &CpModel,
    var: VarId,
    value: i64,
    values: &mut [Option<i64>],
    changed: &mut bool,
) -> bool {
    let (lo, hi) = model.bounds(var);
    if value < lo || value > hi {
        return false;
    }
    values[var.index()] = Some(value);
    *changed = true;
    true
}

/// Sound lower bound on the objective under a partial assignment.
fn objective_lower_bound(model: &CpModel, values: &[Option<i64>]) -> i64 {
    model
        .cost_terms()
        .iter()
        .map(|t| {
            let (lo, hi) = model.bounds(t.var);
            let v = values[t.var.index()].unwrap_or(if t.weight >= 0 { lo } else { hi });
            t.weight * v
        })
        .sum()
}
