//! Constraint model intermediate representation.
//!
//! The vocabulary the rostering libraries compile into and a solver
//! consumes: integer/boolean variables with inclusive bounds, linear range
//! constraints, implications reified on a conjunction of 0/1 variables,
//! `max(0, expr)` equalities for soft-bound excesses, and a weighted list
//! of objective cost terms.
//!
//! Every variable carries a structured [`VarTag`] (nurse index, shift
//! index, week index, …) instead of a diagnostic name string, so consumers
//! read metadata rather than parse identifiers.
//!
//! The model can also *evaluate* a full assignment ([`CpModel::check`],
//! [`CpModel::objective_value`]), which is how the decode step audits a
//! solver's answer and how tests pin down encodings.
//!
//! # Reference
//! - Rossi et al. (2006), "Handbook of Constraint Programming"

mod solver;

pub use solver::{CpSolver, ExhaustiveSolver, SolveOutcome, SolveStatus, Solution, SolverConfig};

use serde::{Deserialize, Serialize};

/// Index of a variable within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarId(usize);

impl VarId {
    /// Position in the model's variable table.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// Structured variable metadata.
///
/// Replaces string-keyed diagnostic names: read-back and diagnostics match
/// on indices, never on formatted identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarTag {
    /// Decision cell: nurse n works shift instance s.
    Work { nurse: usize, shift: usize },
    /// Hours a nurse works within one week bundle.
    WeekHours { nurse: usize, week: usize },
    /// Hours short of the nurse's soft weekly floor.
    UnderHours { nurse: usize, week: usize },
    /// Hours beyond the nurse's soft weekly ceiling.
    OverHours { nurse: usize, week: usize },
    /// Penalized day-to-day transition taken between two instances.
    TransitionViolation { nurse: usize, prev: usize, next: usize },
    /// Penalized work run shorter than the minimum; `start` is the
    /// instance index of the run's first interior slot.
    ShortRun { nurse: usize, start: usize, len: usize },
    /// Saturday instance worked without its same-slot Sunday counterpart.
    BrokenWeekend { nurse: usize, saturday: usize },
    /// Soft preference violated on one instance.
    PreferenceMiss { nurse: usize, shift: usize },
    /// Untagged auxiliary variable.
    Aux,
}

/// A linear expression `Σ coefficient · var + constant`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinExpr {
    terms: Vec<(VarId, i64)>,
    constant: i64,
}

impl LinExpr {
    /// Creates an empty expression (value 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of variables with coefficient 1.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        let mut expr = Self::new();
        for var in vars {
            expr.add_term(var, 1);
        }
        expr
    }

    /// Builder: appends `coefficient · var`.
    pub fn term(mut self, var: VarId, coefficient: i64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    /// Builder: adds a constant offset.
    pub fn plus(mut self, constant: i64) -> Self {
        self.constant += constant;
        self
    }

    /// Appends `coefficient · var`.
    pub fn add_term(&mut self, var: VarId, coefficient: i64) {
        if coefficient != 0 {
            self.terms.push((var, coefficient));
        }
    }

    /// The (variable, coefficient) terms.
    #[inline]
    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    /// The constant offset.
    #[inline]
    pub fn constant(&self) -> i64 {
        self.constant
    }

    /// Evaluates the expression against a full assignment.
    pub fn value(&self, values: &[i64]) -> i64 {
        self.constant
            + self
                .terms
                .iter()
                .map(|(var, coef)| coef * values[var.index()])
                .sum::<i64>()
    }
}

/// Inclusive linear range constraint `min ≤ expr ≤ max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// Constrained expression.
    pub expr: LinExpr,
    /// Inclusive lower bound (`i64::MIN` = unbounded).
    pub min: i64,
    /// Inclusive upper bound (`i64::MAX` = unbounded).
    pub max: i64,
}

impl LinearConstraint {
    /// `expr == rhs`.
    pub fn eq(expr: LinExpr, rhs: i64) -> Self {
        Self {
            expr,
            min: rhs,
            max: rhs,
        }
    }

    /// `expr ≤ max`.
    pub fn at_most(expr: LinExpr, max: i64) -> Self {
        Self {
            expr,
            min: i64::MIN,
            max,
        }
    }

    /// `expr ≥ min`.
    pub fn at_least(expr: LinExpr, min: i64) -> Self {
        Self {
            expr,
            min,
            max: i64::MAX,
        }
    }

    /// Whether the constraint holds under a full assignment.
    pub fn holds(&self, values: &[i64]) -> bool {
        let v = self.expr.value(values);
        self.min <= v && v <= self.max
    }
}

/// A boolean literal over a 0/1 variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lit {
    /// Underlying 0/1 variable.
    pub var: VarId,
    /// Whether the literal is `var == 0`.
    pub negated: bool,
}

impl Lit {
    /// Positive literal (`var == 1`).
    pub fn pos(var: VarId) -> Self {
        Self {
            var,
            negated: false,
        }
    }

    /// Negative literal (`var == 0`).
    pub fn neg(var: VarId) -> Self {
        Self { var, negated: true }
    }
}

/// One primitive constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpConstraint {
    /// Unconditional linear range.
    Linear(LinearConstraint),
    /// `then` must hold whenever every condition variable is 1.
    Implication {
        /// Conjunction of 0/1 condition variables.
        conditions: Vec<VarId>,
        /// Constraint enforced under the conjunction.
        then: LinearConstraint,
    },
    /// `target == max(expr, 0)`.
    MaxOfZero {
        /// Defined variable.
        target: VarId,
        /// Expression clamped at zero.
        expr: LinExpr,
    },
}

impl CpConstraint {
    /// Whether the constraint holds under a full assignment.
    pub fn is_satisfied(&self, values: &[i64]) -> bool {
        match self {
            Self::Linear(lc) => lc.holds(values),
            Self::Implication { conditions, then } => {
                let active = conditions.iter().all(|c| values[c.index()] == 1);
                !active || then.holds(values)
            }
            Self::MaxOfZero { target, expr } => {
                values[target.index()] == expr.value(values).max(0)
            }
        }
    }
}

/// A weighted objective contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTerm {
    /// Penalty (or indicator) variable.
    pub var: VarId,
    /// Integer weight in the minimization objective.
    pub weight: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct VarDef {
    min: i64,
    max: i64,
    tag: VarTag,
}

/// The constraint model under construction.
///
/// Constraint and objective builders only append; nothing is removed or
/// rewritten once emitted. One model corresponds to one roster period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CpModel {
    vars: Vec<VarDef>,
    constraints: Vec<CpConstraint>,
    objective: Vec<CostTerm>,
}

impl CpModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a 0/1 variable.
    pub fn new_bool_var(&mut self, tag: VarTag) -> VarId {
        self.new_int_var(0, 1, tag)
    }

    /// Adds an integer variable with inclusive bounds.
    pub fn new_int_var(&mut self, min: i64, max: i64, tag: VarTag) -> VarId {
        debug_assert!(min <= max, "empty domain for {tag:?}");
        self.vars.push(VarDef { min, max, tag });
        VarId(self.vars.len() - 1)
    }

    /// Number of variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Inclusive bounds of a variable.
    pub fn bounds(&self, var: VarId) -> (i64, i64) {
        let def = &self.vars[var.index()];
        (def.min, def.max)
    }

    /// Metadata tag of a variable.
    pub fn tag(&self, var: VarId) -> VarTag {
        self.vars[var.index()].tag
    }

    /// First variable carrying a tag, if any.
    pub fn find_var(&self, tag: VarTag) -> Option<VarId> {
        self.vars.iter().position(|def| def.tag == tag).map(VarId)
    }

    /// Adds `expr == rhs`.
    pub fn add_eq(&mut self, expr: LinExpr, rhs: i64) {
        self.constraints
            .push(CpConstraint::Linear(LinearConstraint::eq(expr, rhs)));
    }

    /// Adds `expr ≤ max`.
    pub fn add_at_most(&mut self, expr: LinExpr, max: i64) {
        self.constraints
            .push(CpConstraint::Linear(LinearConstraint::at_most(expr, max)));
    }

    /// Adds `expr ≥ min`.
    pub fn add_at_least(&mut self, expr: LinExpr, min: i64) {
        self.constraints
            .push(CpConstraint::Linear(LinearConstraint::at_least(expr, min)));
    }

    /// Adds a constraint enforced only while every condition variable is 1.
    pub fn add_implication(&mut self, conditions: Vec<VarId>, then: LinearConstraint) {
        self.constraints
            .push(CpConstraint::Implication { conditions, then });
    }

    /// Adds `target == max(expr, 0)`.
    pub fn add_max_of_zero(&mut self, target: VarId, expr: LinExpr) {
        self.constraints
            .push(CpConstraint::MaxOfZero { target, expr });
    }

    /// Adds a disjunction of literals (`at least one holds`).
    ///
    /// Encoded linearly: positive literals contribute `var`, negative
    /// literals `1 − var`, and the sum must reach 1.
    pub fn add_clause(&mut self, literals: &[Lit]) {
        let mut expr = LinExpr::new();
        for lit in literals {
            if lit.negated {
                expr.add_term(lit.var, -1);
                expr = expr.plus(1);
            } else {
                expr.add_term(lit.var, 1);
            }
        }
        self.constraints
            .push(CpConstraint::Linear(LinearConstraint::at_least(expr, 1)));
    }

    /// Adds a weighted objective term.
    pub fn add_cost(&mut self, var: VarId, weight: i64) {
        self.objective.push(CostTerm { var, weight });
    }

    /// The emitted constraints.
    pub fn constraints(&self) -> &[CpConstraint] {
        &self.constraints
    }

    /// Number of emitted constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// The accumulated objective cost terms.
    pub fn cost_terms(&self) -> &[CostTerm] {
        &self.objective
    }

    /// Objective value of a full assignment.
    pub fn objective_value(&self, values: &[i64]) -> i64 {
        self.objective
            .iter()
            .map(|t| t.weight * values[t.var.index()])
            .sum()
    }

    /// Indices of constraints violated by a full assignment.
    ///
    /// Variable bounds are checked as well; a bound breach reports as a
    /// violation of no particular constraint, so it is appended after the
    /// constraint indices using `constraint_count()` as a sentinel base.
    pub fn check(&self, values: &[i64]) -> Vec<usize> {
        let mut violated: Vec<usize> = self
            .constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_satisfied(values))
            .map(|(i, _)| i)
            .collect();
        for (i, def) in self.vars.iter().enumerate() {
            let v = values[i];
            if v < def.min || v > def.max {
                violated.push(self.constraints.len() + i);
            }
        }
        violated
    }

    /// Whether a full assignment satisfies every constraint and bound.
    pub fn is_feasible(&self, values: &[i64]) -> bool {
        self.check(values).is_empty()
    }
}
