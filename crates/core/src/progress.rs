// SPDX-License-Identifier: MIT

//!
//! Progress metrics: estimated 1RM and training volume
//!

use crate::ExerciseSet;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Above this many reps the Epley estimate stops being meaningful and the raw
/// load is reported instead
pub const MAX_REPS_FOR_ONE_RM_ESTIMATE: u32 = 10;

/// Estimate a one-rep max from a logged set using the Epley formula
/// (`load * (1 + reps / 30)`).  Sets of more than
/// [`MAX_REPS_FOR_ONE_RM_ESTIMATE`] reps report the raw load.
pub fn estimated_one_rm(reps: u32, load: f64) -> f64 {
    if reps == 0 || reps > MAX_REPS_FOR_ONE_RM_ESTIMATE {
        return load;
    }
    load * (1.0 + reps as f64 / 30.0)
}

/// The volume of one set (`reps * load`)
pub fn set_volume(set: &ExerciseSet) -> f64 {
    set.reps() as f64 * set.load()
}

/// The total volume across a collection of sets
pub fn total_volume(sets: &[ExerciseSet]) -> f64 {
    sets.iter().map(set_volume).sum()
}

/// The mean rep count across a collection of sets (`None` when empty)
pub fn average_reps(sets: &[ExerciseSet]) -> Option<f64> {
    if sets.is_empty() {
        return None;
    }
    Some(sets.iter().map(|set| set.reps() as f64).sum::<f64>() / sets.len() as f64)
}

/// The set with the highest estimated 1RM (`None` when empty)
pub fn best_set(sets: &[ExerciseSet]) -> Option<&ExerciseSet> {
    sets.iter().max_by(|a, b| {
        estimated_one_rm(a.reps(), a.load()).total_cmp(&estimated_one_rm(b.reps(), b.load()))
    })
}

/// The Sunday on or before the given date.  Weeks bucket Sunday-first, the
/// same convention the calendar grid uses.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// One point on a 1RM progress chart: the best estimated 1RM logged on a day
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct OneRmPoint {
    /// The day the sets were logged
    pub date: NaiveDate,

    /// The best estimated 1RM across that day's sets
    pub one_rm: f64,
}

/// One bar on a weekly volume chart
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct WeeklyVolume {
    /// The Sunday the week starts on
    pub week: NaiveDate,

    /// Total volume logged during that week
    pub volume: f64,
}

/// Reduce dated sets to one [`OneRmPoint`] per day (the day's best estimate),
/// sorted by date
pub fn one_rm_points(sets_by_date: &[(NaiveDate, ExerciseSet)]) -> Vec<OneRmPoint> {
    let mut best_per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (date, set) in sets_by_date {
        let estimate = estimated_one_rm(set.reps(), set.load());
        best_per_day
            .entry(*date)
            .and_modify(|best| *best = best.max(estimate))
            .or_insert(estimate);
    }
    best_per_day
        .into_iter()
        .map(|(date, one_rm)| OneRmPoint { date, one_rm })
        .collect()
}

/// Bucket dated sets into Sunday-start weeks and total each week's volume,
/// sorted by week
pub fn weekly_volumes(sets_by_date: &[(NaiveDate, ExerciseSet)]) -> Vec<WeeklyVolume> {
    let mut volume_per_week: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (date, set) in sets_by_date {
        *volume_per_week.entry(week_start(*date)).or_insert(0.0) += set_volume(set);
    }
    volume_per_week
        .into_iter()
        .map(|(week, volume)| WeeklyVolume { week, volume })
        .collect()
}
