//! Soft constraint / objective library.
//!
//! Every function here contributes (penalty variable, weight) pairs to the
//! model's objective; the solver minimizes their weighted sum jointly with
//! hard-constraint feasibility.
//!
//! The centerpiece is [`add_soft_sum`]: a bounded linear sum with a hard
//! floor/ceiling and softer target bounds whose violations are priced
//! asymmetrically. Weekly contract-hour adherence is one instantiation of
//! it; any other aggregate bound can reuse it unchanged.

use chrono::{Datelike, Weekday};

use crate::bundles::{self, DayBundle, WeekBundle};
use crate::calendar::SLOT_LABELS;
use crate::cp::{CpModel, LinExpr, Lit, VarTag};
use crate::models::{Nurse, RosterRule, RuleKind, ShiftInstance};

use super::{nurse_index, BuildError, WorkMatrix};

/// Hard weekly hour ceiling (CAO Gehandicaptenzorg 2021-2024, pp. 92).
pub const MAX_WEEK_HOURS: i64 = 60;

/// Instance count of a full seven-day week (7 × 8 slots); partial week
/// bundles pro-rate their hour coefficients against this.
pub const FULL_WEEK_INSTANCES: f64 = 56.0;

/// Shortest run of identical slots that goes unpenalized.
pub const MIN_RUN_LENGTH: usize = 3;

/// Cost of one violated soft (dis)preference.
pub const PREFERENCE_COST: i64 = 4;

/// Cost of a Saturday worked without its Sunday counterpart.
pub const BROKEN_WEEKEND_COST: i64 = 2;

/// Cost per shift assigned to externally contracted staff.
pub const EXTERNAL_SHIFT_COST: i64 = 1;

/// Day-to-day transition catalog: (previous label, next label, weight).
///
/// Weight 0 marks a hard mutual exclusion — the pair may not be worked by
/// one nurse on consecutive days. Positive weights price the transition
/// instead of forbidding it. Night transitions are absent here; they are
/// the hard library's post-night rest rule.
pub const TRANSITION_PENALTIES: &[(&str, &str, i64)] = &[
    // Evening ends at 23:00; an early day start would break the rest window.
    ("a0", "dk0", 0),
    ("a0", "dm0", 0),
    ("a1", "dk0", 0),
    ("a1", "dm0", 0),
    // Evening into a long day: legal, but heavy.
    ("a0", "dl0", 2),
    ("a0", "dl1", 2),
    ("a1", "dl0", 2),
    ("a1", "dl1", 2),
    // Long day into an early day: discouraged.
    ("dl0", "dk0", 1),
    ("dl0", "dm0", 1),
    ("dl1", "dk0", 1),
    ("dl1", "dm0", 1),
];

/// Bounds and prices for one [`add_soft_sum`] call.
#[derive(Debug, Clone, Copy)]
pub struct SoftBounds {
    /// Hard lower bound of the sum.
    pub hard_min: i64,
    /// Soft target floor; shortfalls below it are priced.
    pub soft_min: i64,
    /// Weight per unit below `soft_min`.
    pub min_cost: i64,
    /// Soft target ceiling; overruns above it are priced.
    pub soft_max: i64,
    /// Hard upper bound of the sum.
    pub hard_max: i64,
    /// Weight per unit above `soft_max`.
    pub max_cost: i64,
}

/// Emits a bounded sum with asymmetric soft-target pricing.
///
/// Introduces one integer sum variable clamped to the hard range and
/// constrained equal to `expr`. For each soft bound stricter than its hard
/// counterpart (and positively priced), one non-negative excess variable
/// equal to `max(0, soft_min − sum)` resp. `max(0, sum − soft_max)` is
/// created and weighted into the objective.
///
/// Returns the sum variable.
pub fn add_soft_sum(
    model: &mut CpModel,
    expr: LinExpr,
    bounds: SoftBounds,
    sum_tag: VarTag,
    under_tag: VarTag,
    over_tag: VarTag,
) -> crate::cp::VarId {
    let sum_var = model.new_int_var(bounds.hard_min, bounds.hard_max, sum_tag);
    model.add_eq(expr.term(sum_var, -1), 0);

    if bounds.soft_min > bounds.hard_min && bounds.min_cost > 0 {
        let under = model.new_int_var(0, bounds.soft_min - bounds.hard_min, under_tag);
        model.add_max_of_zero(under, LinExpr::new().term(sum_var, -1).plus(bounds.soft_min));
        model.add_cost(under, bounds.min_cost);
    }
    if bounds.soft_max < bounds.hard_max && bounds.max_cost > 0 {
        let over = model.new_int_var(0, bounds.hard_max - bounds.soft_max, over_tag);
        model.add_max_of_zero(over, LinExpr::new().term(sum_var, 1).plus(-bounds.soft_max));
        model.add_cost(over, bounds.max_cost);
    }
    sum_var
}

/// Weekly contract-hour adherence per (nurse, week bundle).
///
/// The sum expression weights each cell by the instance's worked hours,
/// pro-rated by the bundle's fraction of a full week, so partial boundary
/// weeks target a proportional share of the contract. External staff pay
/// double for both shortfall and overrun; everyone shares the hard
/// [`MAX_WEEK_HOURS`] ceiling.
pub fn add_weekly_hours(
    model: &mut CpModel,
    work: &WorkMatrix,
    nurses: &[Nurse],
    shifts: &[ShiftInstance],
    weeks: &[WeekBundle],
) {
    for (nurse, def) in nurses.iter().enumerate() {
        let (min_cost, max_cost) = if def.external { (2, 2) } else { (1, 1) };
        for (week, bundle) in weeks.iter().enumerate() {
            let fraction = bundle.indices.len() as f64 / FULL_WEEK_INSTANCES;
            let mut expr = LinExpr::new();
            for &s in &bundle.indices {
                expr.add_term(work.var(nurse, s), (shifts[s].work_hours() * fraction) as i64);
            }
            let target = def.contract_hours as i64;
            add_soft_sum(
                model,
                expr,
                SoftBounds {
                    hard_min: 0,
                    soft_min: target,
                    min_cost,
                    soft_max: target,
                    hard_max: MAX_WEEK_HOURS,
                    max_cost,
                },
                VarTag::WeekHours { nurse, week },
                VarTag::UnderHours { nurse, week },
                VarTag::OverHours { nurse, week },
            );
        }
    }
}

/// Emits the day-to-day transition catalog.
///
/// Weight-0 entries become hard mutual exclusions; positive entries get a
/// violation indicator forced up whenever one nurse works both sides, and
/// priced at the catalog weight.
pub fn add_transition_penalties(model: &mut CpModel, work: &WorkMatrix, shifts: &[ShiftInstance]) {
    for &(prev, next, weight) in TRANSITION_PENALTIES {
        for (p, q) in bundles::transition_pairs(shifts, prev, next) {
            for nurse in 0..work.nurse_count() {
                if weight == 0 {
                    let expr = LinExpr::sum([work.var(nurse, p), work.var(nurse, q)]);
                    model.add_at_most(expr, 1);
                } else {
                    let violation =
                        model.new_bool_var(VarTag::TransitionViolation { nurse, prev: p, next: q });
                    // violation ≥ work_p + work_q − 1
                    let expr = LinExpr::new()
                        .term(work.var(nurse, p), 1)
                        .term(work.var(nurse, q), 1)
                        .term(violation, -1);
                    model.add_at_most(expr, 1);
                    model.add_cost(violation, weight);
                }
            }
        }
    }
}

/// Penalizes isolated runs shorter than [`MIN_RUN_LENGTH`] per slot label.
///
/// For every window of `len < MIN_RUN_LENGTH` consecutive positions in a
/// label's sequence, a negated bounded span — border instances not worked,
/// interior instances all worked — may only occur if the window's violation
/// indicator fires. The weight grows as the run gets shorter:
/// `MIN_RUN_LENGTH − len`.
pub fn add_min_run_length(model: &mut CpModel, work: &WorkMatrix, shifts: &[ShiftInstance]) {
    for label in SLOT_LABELS {
        let seq = bundles::label_sequence(shifts, label);
        for nurse in 0..work.nurse_count() {
            for len in 1..MIN_RUN_LENGTH {
                if len > seq.len() {
                    break;
                }
                for start in 0..=seq.len() - len {
                    let mut span = Vec::new();
                    if start > 0 {
                        span.push(Lit::pos(work.var(nurse, seq[start - 1])));
                    }
                    for i in 0..len {
                        span.push(Lit::neg(work.var(nurse, seq[start + i])));
                    }
                    if start + len < seq.len() {
                        span.push(Lit::pos(work.var(nurse, seq[start + len])));
                    }
                    let violation = model.new_bool_var(VarTag::ShortRun {
                        nurse,
                        start: seq[start],
                        len,
                    });
                    span.push(Lit::pos(violation));
                    model.add_clause(&span);
                    model.add_cost(violation, (MIN_RUN_LENGTH - len) as i64);
                }
            }
        }
    }
}

/// Prices every violated soft (dis)preference rule.
///
/// A dispreference costs [`PREFERENCE_COST`] per matching instance the
/// nurse still works — the cell variable itself is the indicator. A
/// preference costs the same per matching instance the nurse does *not*
/// work, via a complement variable. Date and weekday fields, when present,
/// narrow the matching instances.
pub fn add_preference_penalties(
    model: &mut CpModel,
    work: &WorkMatrix,
    nurses: &[Nurse],
    shifts: &[ShiftInstance],
    rules: &[RosterRule],
) -> Result<(), BuildError> {
    for rule in rules {
        if rule.classify()? != RuleKind::SoftPreference {
            continue;
        }
        let Some(name) = &rule.nurse else {
            continue;
        };
        let nurse = nurse_index(nurses, name)?;
        let abbrev = rule.shift.as_deref().expect("classified preference carries a shift");

        for (s, shift) in shifts.iter().enumerate() {
            if !shift.matches_abbrev(abbrev) {
                continue;
            }
            if rule.date.is_some_and(|date| shift.date() != date) {
                continue;
            }
            if rule.weekday.is_some_and(|weekday| shift.weekday() != weekday) {
                continue;
            }
            if rule.wants_assignment() {
                let miss = model.new_bool_var(VarTag::PreferenceMiss { nurse, shift: s });
                model.add_eq(LinExpr::sum([work.var(nurse, s), miss]), 1);
                model.add_cost(miss, PREFERENCE_COST);
            } else {
                model.add_cost(work.var(nurse, s), PREFERENCE_COST);
            }
        }
    }
    Ok(())
}

/// Favors whole weekends: a worked Saturday slot without the same slot on
/// Sunday raises a priced indicator. The Sunday assignment is never
/// forced, only the broken-weekend indicator is.
pub fn add_whole_weekends(model: &mut CpModel, work: &WorkMatrix, days: &[DayBundle]) {
    for pair in days.windows(2) {
        let (saturday, sunday) = (&pair[0], &pair[1]);
        if saturday.date.weekday() != Weekday::Sat {
            continue;
        }
        let slots = saturday.indices.len().min(sunday.indices.len());
        for slot in 0..slots {
            let (sat, sun) = (saturday.indices[slot], sunday.indices[slot]);
            for nurse in 0..work.nurse_count() {
                let broken = model.new_bool_var(VarTag::BrokenWeekend {
                    nurse,
                    saturday: sat,
                });
                // broken ≥ work_sat − work_sun
                let expr = LinExpr::new()
                    .term(work.var(nurse, sat), 1)
                    .term(work.var(nurse, sun), -1)
                    .term(broken, -1);
                model.add_at_most(expr, 0);
                model.add_cost(broken, BROKEN_WEEKEND_COST);
            }
        }
    }
}

/// Prices every assignment to externally contracted staff, so permanent
/// staff cover a shift whenever the rest of the objective allows it.
pub fn add_external_staff_cost(model: &mut CpModel, work: &WorkMatrix, nurses: &[Nurse]) {
    for (nurse, def) in nurses.iter().enumerate() {
        if !def.external {
            continue;
        }
        for shift in 0..work.shift_count() {
            model.add_cost(work.var(nurse, shift), EXTERNAL_SHIFT_COST);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ShiftCalendar;
    use crate::models::ShiftType;
    use chrono::{NaiveDate, NaiveTime};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn zeroes(model: &CpModel) -> Vec<i64> {
        vec![0; model.var_count()]
    }

    #[test]
    fn test_soft_sum_over_excess() {
        // Contract 36, two 22-hour blocks worked → sum 44, over-excess 8.
        let mut model = CpModel::new();
        let a = model.new_bool_var(VarTag::Aux);
        let b = model.new_bool_var(VarTag::Aux);
        let expr = LinExpr::new().term(a, 22).term(b, 22);
        let sum = add_soft_sum(
            &mut model,
            expr,
            SoftBounds {
                hard_min: 0,
                soft_min: 36,
                min_cost: 1,
                soft_max: 36,
                hard_max: 60,
                max_cost: 1,
            },
            VarTag::WeekHours { nurse: 0, week: 0 },
            VarTag::UnderHours { nurse: 0, week: 0 },
            VarTag::OverHours { nurse: 0, week: 0 },
        );

        let under = model
            .find_var(VarTag::UnderHours { nurse: 0, week: 0 })
            .unwrap();
        let over = model
            .find_var(VarTag::OverHours { nurse: 0, week: 0 })
            .unwrap();

        let mut values = zeroes(&model);
        values[a.index()] = 1;
        values[b.index()] = 1;
        values[sum.index()] = 44;
        values[over.index()] = 8;
        values[under.index()] = 0;
        assert!(model.is_feasible(&values));
        assert_eq!(model.objective_value(&values), 8);

        // Claiming zero excess is inconsistent.
        values[over.index()] = 0;
        assert!(!model.is_feasible(&values));
    }

    #[test]
    fn test_soft_sum_under_excess() {
        let mut model = CpModel::new();
        let a = model.new_bool_var(VarTag::Aux);
        let expr = LinExpr::new().term(a, 8);
        let sum = add_soft_sum(
            &mut model,
            expr,
            SoftBounds {
                hard_min: 0,
                soft_min: 36,
                min_cost: 2,
                soft_max: 36,
                hard_max: 60,
                max_cost: 2,
            },
            VarTag::WeekHours { nurse: 0, week: 0 },
            VarTag::UnderHours { nurse: 0, week: 0 },
            VarTag::OverHours { nurse: 0, week: 0 },
        );
        let under = model
            .find_var(VarTag::UnderHours { nurse: 0, week: 0 })
            .unwrap();
        let over = model
            .find_var(VarTag::OverHours { nurse: 0, week: 0 })
            .unwrap();

        let mut values = zeroes(&model);
        values[a.index()] = 1;
        values[sum.index()] = 8;
        values[under.index()] = 28;
        values[over.index()] = 0;
        assert!(model.is_feasible(&values));
        // 28 hours short at cost 2 per hour.
        assert_eq!(model.objective_value(&values), 56);
    }

    #[test]
    fn test_soft_sum_hard_ceiling() {
        let mut model = CpModel::new();
        let a = model.new_bool_var(VarTag::Aux);
        let sum = add_soft_sum(
            &mut model,
            LinExpr::new().term(a, 70),
            SoftBounds {
                hard_min: 0,
                soft_min: 0,
                min_cost: 0,
                soft_max: 60,
                hard_max: 60,
                max_cost: 1,
            },
            VarTag::Aux,
            VarTag::Aux,
            VarTag::Aux,
        );

        // 70 hours cannot be represented: the sum variable's domain ends at 60.
        let mut values = zeroes(&model);
        values[a.index()] = 1;
        values[sum.index()] = 70;
        assert!(!model.is_feasible(&values));
    }

    #[test]
    fn test_weekly_hours_external_staff_pay_double() {
        let types = vec![ShiftType::new("dag kort", "dk", time(8, 0), time(16, 0), 1)];
        let cal = ShiftCalendar::build(types, 2024, 3).unwrap();
        let weeks = bundles::week_bundles(cal.shifts());
        let staff = vec![
            Nurse::new("Perm", 36.0),
            Nurse::new("Flex", 36.0).external(),
        ];

        let mut model = CpModel::new();
        let work = WorkMatrix::build(&mut model, 2, cal.len());
        add_weekly_hours(&mut model, &work, &staff, cal.shifts(), &weeks);

        // Both nurses have a sum variable per week, hard-bounded 0..60.
        let sum = model.find_var(VarTag::WeekHours { nurse: 1, week: 0 }).unwrap();
        assert_eq!(model.bounds(sum), (0, MAX_WEEK_HOURS));

        // Cost weights: permanent under-excess 1, external under-excess 2.
        let perm_under = model
            .find_var(VarTag::UnderHours { nurse: 0, week: 0 })
            .unwrap();
        let flex_under = model
            .find_var(VarTag::UnderHours { nurse: 1, week: 0 })
            .unwrap();
        let weight_of = |var| {
            model
                .cost_terms()
                .iter()
                .find(|t| t.var == var)
                .map(|t| t.weight)
        };
        assert_eq!(weight_of(perm_under), Some(1));
        assert_eq!(weight_of(flex_under), Some(2));
    }

    #[test]
    fn test_transition_weight_zero_is_exclusion() {
        let types = vec![
            ShiftType::new("dag kort", "dk", time(8, 0), time(16, 0), 1),
            ShiftType::new("avond", "a", time(15, 0), time(23, 0), 1),
        ];
        let cal = ShiftCalendar::build(types, 2024, 3).unwrap();

        let mut model = CpModel::new();
        let work = WorkMatrix::build(&mut model, 1, cal.len());
        add_transition_penalties(&mut model, &work, cal.shifts());

        // a0 of day 1 is index 1, dk0 of day 2 is index 2.
        let mut values = zeroes(&model);
        values[work.var(0, 1).index()] = 1;
        values[work.var(0, 2).index()] = 1;
        assert!(!model.is_feasible(&values));

        // Either one alone is fine.
        let mut values = zeroes(&model);
        values[work.var(0, 1).index()] = 1;
        assert!(model.is_feasible(&values));
    }

    #[test]
    fn test_transition_positive_weight_prices_violation() {
        let types = vec![
            ShiftType::new("dag lang", "dl", time(8, 0), time(17, 0), 1),
            ShiftType::new("avond", "a", time(15, 0), time(23, 0), 1),
        ];
        let cal = ShiftCalendar::build(types, 2024, 3).unwrap();

        let mut model = CpModel::new();
        let work = WorkMatrix::build(&mut model, 1, cal.len());
        add_transition_penalties(&mut model, &work, cal.shifts());

        // a0 of day 1 (index 1) into dl0 of day 2 (index 2): weight 2.
        let violation = model
            .find_var(VarTag::TransitionViolation {
                nurse: 0,
                prev: 1,
                next: 2,
            })
            .unwrap();

        let mut values = zeroes(&model);
        values[work.var(0, 1).index()] = 1;
        values[work.var(0, 2).index()] = 1;
        assert!(!model.is_feasible(&values)); // indicator must fire
        values[violation.index()] = 1;
        assert!(model.is_feasible(&values));
        assert_eq!(model.objective_value(&values), 2);
    }

    #[test]
    fn test_min_run_length_prices_isolated_day() {
        let types = vec![ShiftType::new("dag kort", "dk", time(8, 0), time(16, 0), 1)];
        let cal = ShiftCalendar::build(types, 2024, 3).unwrap();

        let mut model = CpModel::new();
        let work = WorkMatrix::build(&mut model, 1, cal.len());
        add_min_run_length(&mut model, &work, cal.shifts());

        // Worked day 2 only: an isolated one-day run.
        let mut values = zeroes(&model);
        values[work.var(0, 1).index()] = 1;
        assert!(!model.is_feasible(&values));

        let violation = model
            .find_var(VarTag::ShortRun {
                nurse: 0,
                start: 1,
                len: 1,
            })
            .unwrap();
        values[violation.index()] = 1;
        assert!(model.is_feasible(&values));
        // Weight scales with the shortfall: 3 − 1 = 2.
        assert_eq!(model.objective_value(&values), 2);
    }

    #[test]
    fn test_min_run_length_accepts_full_run() {
        let types = vec![ShiftType::new("dag kort", "dk", time(8, 0), time(16, 0), 1)];
        let cal = ShiftCalendar::build(types, 2024, 3).unwrap();

        let mut model = CpModel::new();
        let work = WorkMatrix::build(&mut model, 1, cal.len());
        add_min_run_length(&mut model, &work, cal.shifts());

        // Days 2-4 worked: run of three, no indicator needed.
        let mut values = zeroes(&model);
        for s in [1, 2, 3] {
            values[work.var(0, s).index()] = 1;
        }
        assert!(model.is_feasible(&values));
        assert_eq!(model.objective_value(&values), 0);
    }

    #[test]
    fn test_whole_weekend_penalty() {
        let types = vec![ShiftType::new("dag kort", "dk", time(8, 0), time(16, 0), 1)];
        let cal = ShiftCalendar::build(types, 2024, 3).unwrap();
        let days = bundles::day_bundles(cal.shifts());

        let mut model = CpModel::new();
        let work = WorkMatrix::build(&mut model, 1, cal.len());
        add_whole_weekends(&mut model, &work, &days);

        // 2024-03-02 is the first Saturday (index 1); 03-03 Sunday (index 2).
        let saturday = cal
            .shifts()
            .iter()
            .position(|s| s.date() == NaiveDate::from_ymd_opt(2024, 3, 2).unwrap())
            .unwrap();
        let sunday = cal
            .shifts()
            .iter()
            .position(|s| s.date() == NaiveDate::from_ymd_opt(2024, 3, 3).unwrap())
            .unwrap();

        let mut values = zeroes(&model);
        values[work.var(0, saturday).index()] = 1;
        assert!(!model.is_feasible(&values)); // broken weekend must be flagged

        let broken = model
            .find_var(VarTag::BrokenWeekend { nurse: 0, saturday })
            .unwrap();
        values[broken.index()] = 1;
        assert!(model.is_feasible(&values));
        assert_eq!(model.objective_value(&values), BROKEN_WEEKEND_COST);

        // Whole weekend worked: no penalty.
        let mut values = zeroes(&model);
        values[work.var(0, saturday).index()] = 1;
        values[work.var(0, sunday).index()] = 1;
        assert!(model.is_feasible(&values));
        assert_eq!(model.objective_value(&values), 0);
    }

    #[test]
    fn test_preference_penalties() {
        let types = vec![
            ShiftType::new("dag kort", "dk", time(8, 0), time(16, 0), 1),
            ShiftType::new("nacht", "n", time(23, 0), time(7, 0), 1),
        ];
        let cal = ShiftCalendar::build(types, 2024, 3).unwrap();
        let staff = vec![Nurse::new("Erin", 36.0)];

        // Erin dislikes nights.
        let rule = RosterRule::new()
            .for_nurse("Erin")
            .for_shift("n")
            .assigning(false);

        let mut model = CpModel::new();
        let work = WorkMatrix::build(&mut model, 1, cal.len());
        add_preference_penalties(&mut model, &work, &staff, cal.shifts(), &[rule]).unwrap();

        // One cost term per night instance, priced on the work cell itself.
        assert_eq!(model.cost_terms().len(), 31);
        let mut values = zeroes(&model);
        let night = cal.shifts().iter().position(|s| s.label == "n0").unwrap();
        values[work.var(0, night).index()] = 1;
        assert_eq!(model.objective_value(&values), PREFERENCE_COST);
    }

    #[test]
    fn test_preference_for_assignment_uses_complement() {
        let types = vec![ShiftType::new("nacht", "n", time(23, 0), time(7, 0), 1)];
        let cal = ShiftCalendar::build(types, 2024, 3).unwrap();
        let staff = vec![Nurse::new("Noor", 36.0)];

        // Noor wants night shifts on Fridays.
        let rule = RosterRule::new()
            .for_nurse("Noor")
            .on_weekday(Weekday::Fri)
            .for_shift("n")
            .assigning(true);

        let mut model = CpModel::new();
        let work = WorkMatrix::build(&mut model, 1, cal.len());
        add_preference_penalties(&mut model, &work, &staff, cal.shifts(), &[rule]).unwrap();

        // March 2024 has five Fridays → five complement variables.
        assert_eq!(model.cost_terms().len(), 5);

        // Working none of them costs 5 × PREFERENCE_COST.
        let mut values = zeroes(&model);
        for term in model.cost_terms() {
            values[term.var.index()] = 1; // complements all fire
        }
        assert!(model.is_feasible(&values));
        assert_eq!(model.objective_value(&values), 5 * PREFERENCE_COST);
    }

    #[test]
    fn test_external_staff_cost() {
        let types = vec![ShiftType::new("dag kort", "dk", time(8, 0), time(16, 0), 1)];
        let cal = ShiftCalendar::build(types, 2024, 3).unwrap();
        let staff = vec![
            Nurse::new("Perm", 36.0),
            Nurse::new("Flex", 36.0).external(),
        ];

        let mut model = CpModel::new();
        let work = WorkMatrix::build(&mut model, 2, cal.len());
        add_external_staff_cost(&mut model, &work, &staff);

        // Only the external nurse's cells are priced.
        assert_eq!(model.cost_terms().len(), cal.len());

        let mut values = zeroes(&model);
        values[work.var(0, 0).index()] = 1; // permanent: free
        assert_eq!(model.objective_value(&values), 0);
        values[work.var(1, 1).index()] = 1; // external: priced
        assert_eq!(model.objective_value(&values), EXTERNAL_SHIFT_COST);
    }
}
