//! Hard constraint library.
//!
//! Every function emits non-negotiable constraints over the decision
//! matrix. Violation of any of them is infeasibility, reported by the
//! solver — nothing here is recovered or relaxed.
//!
//! The weekly 60-hour ceiling is emitted by the shared bounded-sum helper
//! in [`soft`](super::soft) as the hard range of the week-hours variable,
//! matching how contract-hour accounting and the legal ceiling share one
//! sum.
//!
//! # Reference
//! CAO Gehandicaptenzorg 2021-2024, pp. 92 (nightly rest, 60-hour week)

use std::collections::HashMap;

use chrono::Datelike;

use crate::bundles::{self, DayBundle, WeekBundle};
use crate::calendar::{DAY_EVENING_LABELS, NIGHT_LABELS, RESUSCITATION_PAIRS};
use crate::cp::{CpModel, LinExpr, LinearConstraint};
use crate::models::{Nurse, RosterRule, RuleKind, ShiftInstance};

use super::{nurse_index, BuildError, WorkMatrix};

/// Maximum worked shifts per nurse per ISO week.
pub const MAX_WEEK_SHIFTS: i64 = 5;

/// Every shift instance is worked by exactly one nurse.
pub fn add_coverage(model: &mut CpModel, work: &WorkMatrix) {
    for shift in 0..work.shift_count() {
        let expr = LinExpr::sum((0..work.nurse_count()).map(|nurse| work.var(nurse, shift)));
        model.add_eq(expr, 1);
    }
}

/// Every nurse works at most one instance per calendar day.
pub fn add_one_shift_per_day(model: &mut CpModel, work: &WorkMatrix, days: &[DayBundle]) {
    for day in days {
        for nurse in 0..work.nurse_count() {
            let expr = LinExpr::sum(day.indices.iter().map(|&s| work.var(nurse, s)));
            model.add_at_most(expr, 1);
        }
    }
}

/// A worked night forbids every next-day day/evening instance.
///
/// For each night label, each night instance is paired with the day and
/// evening instances before the next occurrence of that label; working the
/// night forces their sum to zero (14-hour rest after a night shift).
pub fn add_night_rest(model: &mut CpModel, work: &WorkMatrix, shifts: &[ShiftInstance]) {
    for night in NIGHT_LABELS {
        for (night_idx, rest) in bundles::follow_up_bundles(shifts, night, &DAY_EVENING_LABELS) {
            for nurse in 0..work.nurse_count() {
                let expr = LinExpr::sum(rest.iter().map(|&s| work.var(nurse, s)));
                model.add_implication(
                    vec![work.var(nurse, night_idx)],
                    LinearConstraint::eq(expr, 0),
                );
            }
        }
    }
}

/// Each day's late, evening and night pair is covered by at least one
/// resuscitation-certified nurse.
pub fn add_resuscitation_cover(
    model: &mut CpModel,
    work: &WorkMatrix,
    nurses: &[Nurse],
    days: &[DayBundle],
    shifts: &[ShiftInstance],
) {
    for day in days {
        for (first, second) in RESUSCITATION_PAIRS {
            let pair: Vec<usize> = day
                .indices
                .iter()
                .copied()
                .filter(|&s| shifts[s].label == first || shifts[s].label == second)
                .collect();
            if pair.is_empty() {
                continue;
            }
            let mut expr = LinExpr::new();
            for (nurse, def) in nurses.iter().enumerate() {
                if def.resuscitation {
                    for &s in &pair {
                        expr.add_term(work.var(nurse, s), 1);
                    }
                }
            }
            model.add_at_least(expr, 1);
        }
    }
}

/// Every nurse works at most [`MAX_WEEK_SHIFTS`] instances per ISO week.
pub fn add_weekly_shift_cap(model: &mut CpModel, work: &WorkMatrix, weeks: &[WeekBundle]) {
    for week in weeks {
        for nurse in 0..work.nurse_count() {
            let expr = LinExpr::sum(week.indices.iter().map(|&s| work.var(nurse, s)));
            model.add_at_most(expr, MAX_WEEK_SHIFTS);
        }
    }
}

/// Emits the constraints of every classified hard rule.
///
/// Soft and inert rules are skipped here; soft rules are the objective
/// library's concern. Streak windows are computed once per distinct length
/// and shared across rules. Date rules whose date falls outside the period
/// match no instance and emit nothing.
pub fn add_rule_constraints(
    model: &mut CpModel,
    work: &WorkMatrix,
    nurses: &[Nurse],
    shifts: &[ShiftInstance],
    rules: &[RosterRule],
) -> Result<(), BuildError> {
    let days = bundles::day_bundles(shifts);
    let mut windows_by_len: HashMap<u32, Vec<bundles::StreakWindow>> = HashMap::new();

    for rule in rules {
        let kind = rule.classify()?;
        let nurse = match &rule.nurse {
            Some(name) => nurse_index(nurses, name)?,
            None => continue,
        };

        match kind {
            RuleKind::ExactDate => {
                let date = rule.date.expect("classified ExactDate carries a date");
                let matching: Vec<usize> = days
                    .iter()
                    .filter(|d| d.date == date)
                    .flat_map(|d| d.indices.iter().copied())
                    .filter(|&s| matches_shift_field(&shifts[s], rule))
                    .collect();
                if matching.is_empty() {
                    continue;
                }
                let expr = LinExpr::sum(matching.iter().map(|&s| work.var(nurse, s)));
                let target = i64::from(rule.wants_assignment());
                model.add_eq(expr, target);
            }
            RuleKind::WeekdayRecurring => {
                let weekday = rule.weekday.expect("classified WeekdayRecurring carries a weekday");
                for day in days.iter().filter(|d| d.date.weekday() == weekday) {
                    let matching: Vec<usize> = day
                        .indices
                        .iter()
                        .copied()
                        .filter(|&s| matches_shift_field(&shifts[s], rule))
                        .collect();
                    if matching.is_empty() {
                        continue;
                    }
                    let expr = LinExpr::sum(matching.iter().map(|&s| work.var(nurse, s)));
                    let target = i64::from(rule.wants_assignment());
                    model.add_eq(expr, target);
                }
            }
            RuleKind::ShiftTypeExclusion => {
                let abbrev = rule.shift.as_deref().expect("classified exclusion carries a shift");
                let expr = LinExpr::sum(
                    shifts
                        .iter()
                        .enumerate()
                        .filter(|(_, shift)| shift.matches_abbrev(abbrev))
                        .map(|(s, _)| work.var(nurse, s)),
                );
                model.add_eq(expr, 0);
            }
            RuleKind::StreakRest => {
                let len = rule.streak_max.expect("classified StreakRest carries a length");
                if !(2..=5).contains(&len) {
                    return Err(BuildError::StreakOutOfRange(len));
                }
                let windows = windows_by_len
                    .entry(len)
                    .or_insert_with(|| bundles::streak_windows(shifts, len as usize));
                for window in windows.iter() {
                    let conditions: Vec<_> = window
                        .picks
                        .iter()
                        .map(|&s| work.var(nurse, s))
                        .collect();
                    let expr = LinExpr::sum(window.rest.iter().map(|&s| work.var(nurse, s)));
                    model.add_implication(conditions, LinearConstraint::eq(expr, 0));
                }
            }
            RuleKind::SoftPreference | RuleKind::Inert => {}
        }
    }
    Ok(())
}

fn matches_shift_field(shift: &ShiftInstance, rule: &RosterRule) -> bool {
    match rule.shift.as_deref() {
        Some(abbrev) => shift.matches_abbrev(abbrev),
        None => true,
    }
}
