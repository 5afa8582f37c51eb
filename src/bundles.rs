//! Bundle engine: derived groupings of shift-instance indices.
//!
//! Every function here is a pure computation over the calendar's instance
//! sequence — no retained state, deterministic output, recomputable at any
//! time. Bundles carry *indices* into the sequence, never instances, so a
//! bundle stays valid exactly as long as the sequence that produced it.
//!
//! Groupings:
//! - [`day_bundles`] / [`day_bundles_for_stem`] — partition by calendar date
//! - [`week_bundles`] — partition by ISO week
//! - [`label_sequence`] / [`label_sequence_on_weekday`] — per-slot-label
//!   subsequences
//! - [`follow_up_bundles`] — a primary instance paired with the target
//!   instances that precede its next occurrence (post-night rest windows)
//! - [`transition_pairs`] — day-to-day (previous-label, next-label) pairs
//! - [`streak_windows`] — one-instance-per-day combinations over N
//!   consecutive days plus the following rest day

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::ShiftInstance;

/// All instance indices of one calendar date, in sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBundle {
    /// The calendar date shared by every member.
    pub date: NaiveDate,
    /// Member indices, in sequence order.
    pub indices: Vec<usize>,
}

/// All instance indices of one ISO week, in sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBundle {
    /// ISO week number shared by every member.
    pub week: u32,
    /// Member indices, in sequence order.
    pub indices: Vec<usize>,
}

/// One enumerated work pattern over consecutive days, plus its rest day.
///
/// `picks` holds exactly one instance index per day of the window;
/// `rest` is the full day bundle of the day immediately after the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakWindow {
    /// One picked instance index per consecutive day.
    pub picks: Vec<usize>,
    /// Indices of the mandatory rest day following the window.
    pub rest: Vec<usize>,
}

/// Partitions the sequence by calendar date.
///
/// The partition is exhaustive and non-overlapping: concatenating the
/// bundles in order reproduces `0..shifts.len()`.
pub fn day_bundles(shifts: &[ShiftInstance]) -> Vec<DayBundle> {
    let mut bundles: Vec<DayBundle> = Vec::new();
    for (s, shift) in shifts.iter().enumerate() {
        match bundles.last_mut() {
            Some(bundle) if bundle.date == shift.date() => bundle.indices.push(s),
            _ => bundles.push(DayBundle {
                date: shift.date(),
                indices: vec![s],
            }),
        }
    }
    bundles
}

/// Day bundles restricted to instances of one type stem.
///
/// Days without a matching instance are omitted.
pub fn day_bundles_for_stem(shifts: &[ShiftInstance], stem: &str) -> Vec<DayBundle> {
    let mut bundles = day_bundles(shifts);
    for bundle in &mut bundles {
        bundle.indices.retain(|&s| shifts[s].stem() == stem);
    }
    bundles.retain(|b| !b.indices.is_empty());
    bundles
}

/// Partitions the sequence by ISO calendar week.
pub fn week_bundles(shifts: &[ShiftInstance]) -> Vec<WeekBundle> {
    let mut bundles: Vec<WeekBundle> = Vec::new();
    for (s, shift) in shifts.iter().enumerate() {
        let week = shift.start.iso_week().week();
        match bundles.last_mut() {
            Some(bundle) if bundle.week == week => bundle.indices.push(s),
            _ => bundles.push(WeekBundle {
                week,
                indices: vec![s],
            }),
        }
    }
    bundles
}

/// Ordered subsequence of instances carrying exactly `label`.
pub fn label_sequence(shifts: &[ShiftInstance], label: &str) -> Vec<usize> {
    shifts
        .iter()
        .enumerate()
        .filter(|(_, shift)| shift.label == label)
        .map(|(s, _)| s)
        .collect()
}

/// Label subsequence further restricted to one weekday.
pub fn label_sequence_on_weekday(
    shifts: &[ShiftInstance],
    label: &str,
    weekday: Weekday,
) -> Vec<usize> {
    shifts
        .iter()
        .enumerate()
        .filter(|(_, shift)| shift.label == label && shift.weekday() == weekday)
        .map(|(s, _)| s)
        .collect()
}

/// Pairs each `primary`-labeled instance with the `target`-labeled
/// instances that follow it before the next `primary` occurrence.
///
/// With a full calendar (every label once per day) the targets are exactly
/// the next day's instances, which makes this the rest-window grouping for
/// post-night constraints. The last primary of the period has no closing
/// occurrence and produces no bundle.
pub fn follow_up_bundles(
    shifts: &[ShiftInstance],
    primary: &str,
    targets: &[&str],
) -> Vec<(usize, Vec<usize>)> {
    let mut bundles: Vec<(usize, Vec<usize>)> = Vec::new();
    let mut open: Option<(usize, Vec<usize>)> = None;

    for (s, shift) in shifts.iter().enumerate() {
        if shift.label == primary {
            if let Some(bundle) = open.take() {
                if !bundle.1.is_empty() {
                    bundles.push(bundle);
                }
            }
            open = Some((s, Vec::new()));
            continue;
        }
        if let Some(bundle) = open.as_mut() {
            if targets.contains(&shift.label.as_str()) {
                bundle.1.push(s);
            }
        }
    }

    bundles
}

/// Day-to-day transition pairs (p, q).
///
/// For every instance p carrying `prev`, q is the first instance carrying
/// `next` strictly after p's calendar day. p and q are never on the same
/// date; instances of `prev` with no later `next` occurrence are skipped.
pub fn transition_pairs(
    shifts: &[ShiftInstance],
    prev: &str,
    next: &str,
) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (p, shift) in shifts.iter().enumerate() {
        if shift.label != prev {
            continue;
        }
        let q = shifts
            .iter()
            .enumerate()
            .skip(p + 1)
            .find(|(_, cand)| cand.label == next && cand.date() > shift.date());
        if let Some((q, _)) = q {
            pairs.push((p, q));
        }
    }
    pairs
}

/// Enumerates every work pattern of `len` consecutive worked days.
///
/// A pattern picks one instance per day across `len` consecutive days; each
/// window is paired with the complete day bundle of day `len + 1`, the
/// mandatory rest day. The fan-out is the product of the per-day slot
/// counts, so `len` is bounded.
///
/// # Panics
/// Panics if `len` is outside `2..=5`.
pub fn streak_windows(shifts: &[ShiftInstance], len: usize) -> Vec<StreakWindow> {
    assert!(
        (2..=5).contains(&len),
        "streak window length {len} outside supported range 2..=5"
    );

    let days = day_bundles(shifts);
    let mut windows = Vec::new();

    // The window needs `len` worked days plus one rest day inside the period.
    if days.len() <= len {
        return windows;
    }
    for start in 0..days.len() - len {
        let window_days: Vec<&[usize]> = days[start..start + len]
            .iter()
            .map(|d| d.indices.as_slice())
            .collect();
        if window_days.iter().any(|d| d.is_empty()) {
            continue;
        }
        let rest = days[start + len].indices.clone();

        // Odometer over one pick per day.
        let mut cursor = vec![0usize; len];
        loop {
            windows.push(StreakWindow {
                picks: cursor
                    .iter()
                    .zip(&window_days)
                    .map(|(&c, day)| day[c])
                    .collect(),
                rest: rest.clone(),
            });

            let mut digit = len;
            loop {
                if digit == 0 {
                    break;
                }
                digit -= 1;
                cursor[digit] += 1;
                if cursor[digit] < window_days[digit].len() {
                    break;
                }
                cursor[digit] = 0;
            }
            if cursor.iter().all(|&c| c == 0) {
                break;
            }
        }
    }

    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ShiftCalendar;
    use crate::models::ShiftType;
    use chrono::NaiveTime;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample_calendar() -> ShiftCalendar {
        let types = vec![
            ShiftType::new("dag kort", "dk", time(8, 0), time(16, 0), 1),
            ShiftType::new("avond", "a", time(15, 0), time(23, 0), 2),
            ShiftType::new("nacht", "n", time(23, 0), time(7, 0), 2),
        ];
        ShiftCalendar::build(types, 2024, 3).unwrap()
    }

    #[test]
    fn test_day_bundles_partition_sequence() {
        let cal = sample_calendar();
        let bundles = day_bundles(cal.shifts());

        assert_eq!(bundles.len(), 31);
        let concatenated: Vec<usize> = bundles.iter().flat_map(|b| b.indices.clone()).collect();
        let expected: Vec<usize> = (0..cal.len()).collect();
        assert_eq!(concatenated, expected);
    }

    #[test]
    fn test_day_bundles_filtered_by_stem() {
        let cal = sample_calendar();
        let bundles = day_bundles_for_stem(cal.shifts(), "a");

        assert_eq!(bundles.len(), 31);
        for bundle in &bundles {
            assert_eq!(bundle.indices.len(), 2);
            for &s in &bundle.indices {
                assert_eq!(cal.shift(s).stem(), "a");
            }
        }
    }

    #[test]
    fn test_week_bundles_follow_iso_weeks() {
        let cal = sample_calendar();
        let bundles = week_bundles(cal.shifts());

        // March 2024: Fri 2024-03-01 is in ISO week 9, Sun 2024-03-31 ends week 13.
        let weeks: Vec<u32> = bundles.iter().map(|b| b.week).collect();
        assert_eq!(weeks, vec![9, 10, 11, 12, 13]);

        // Partition property holds here as well.
        let total: usize = bundles.iter().map(|b| b.indices.len()).sum();
        assert_eq!(total, cal.len());

        // Week 10 is the first full week: 7 days × 5 instances.
        assert_eq!(bundles[1].indices.len(), 35);
    }

    #[test]
    fn test_label_sequence() {
        let cal = sample_calendar();
        let seq = label_sequence(cal.shifts(), "n0");

        assert_eq!(seq.len(), 31);
        for &s in &seq {
            assert_eq!(cal.shift(s).label, "n0");
        }
        // One per day, strictly increasing.
        assert!(seq.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_label_sequence_on_weekday() {
        let cal = sample_calendar();
        let seq = label_sequence_on_weekday(cal.shifts(), "n0", Weekday::Fri);
        // March 2024 has five Fridays: 1, 8, 15, 22, 29.
        assert_eq!(seq.len(), 5);
    }

    #[test]
    fn test_follow_up_bundles_cover_next_day() {
        let cal = sample_calendar();
        let targets = ["dk0", "a0", "a1"];
        let bundles = follow_up_bundles(cal.shifts(), "n0", &targets);

        // The last night has no following occurrence, so 30 bundles.
        assert_eq!(bundles.len(), 30);
        for (night, rest) in &bundles {
            assert_eq!(cal.shift(*night).label, "n0");
            assert_eq!(rest.len(), targets.len());
            let next_day = cal.shift(*night).date().succ_opt().unwrap();
            for &s in rest {
                assert_eq!(cal.shift(s).date(), next_day);
            }
        }
    }

    #[test]
    fn test_transition_pairs_never_same_day() {
        let cal = sample_calendar();
        let pairs = transition_pairs(cal.shifts(), "a0", "dk0");

        assert_eq!(pairs.len(), 30);
        for &(p, q) in &pairs {
            assert_eq!(cal.shift(p).label, "a0");
            assert_eq!(cal.shift(q).label, "dk0");
            assert!(cal.shift(q).date() > cal.shift(p).date());
            assert_eq!(
                cal.shift(q).date(),
                cal.shift(p).date().succ_opt().unwrap()
            );
        }
    }

    #[test]
    fn test_streak_windows_fan_out() {
        let cal = sample_calendar();
        let windows = streak_windows(cal.shifts(), 2);

        // 5 slots per day, 31 days → 29 window positions × 5² combinations.
        assert_eq!(windows.len(), 29 * 25);
        for window in &windows {
            assert_eq!(window.picks.len(), 2);
            let d0 = cal.shift(window.picks[0]).date();
            let d1 = cal.shift(window.picks[1]).date();
            assert_eq!(d1, d0.succ_opt().unwrap());
            // Rest day is the full bundle of the day after the window.
            assert_eq!(window.rest.len(), 5);
            for &s in &window.rest {
                assert_eq!(cal.shift(s).date(), d1.succ_opt().unwrap());
            }
        }
    }

    #[test]
    #[should_panic(expected = "outside supported range")]
    fn test_streak_windows_rejects_out_of_range() {
        let cal = sample_calendar();
        streak_windows(cal.shifts(), 6);
    }

    #[test]
    fn test_bundles_are_idempotent() {
        let cal = sample_calendar();
        assert_eq!(day_bundles(cal.shifts()), day_bundles(cal.shifts()));
        assert_eq!(week_bundles(cal.shifts()), week_bundles(cal.shifts()));
        assert_eq!(
            streak_windows(cal.shifts(), 3),
            streak_windows(cal.shifts(), 3)
        );
    }

    #[test]
    fn test_empty_sequence() {
        assert!(day_bundles(&[]).is_empty());
        assert!(week_bundles(&[]).is_empty());
        assert!(label_sequence(&[], "n0").is_empty());
    }
}
