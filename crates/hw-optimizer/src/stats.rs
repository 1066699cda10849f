//! Headway sequences and their summary statistics.
//!
//! A headway is the gap in minutes between two consecutive departures.  For
//! a schedule of `n >= 2` trips there are `n - 1` headways.  Schedules with
//! fewer than two trips have no headways, and their statistics are defined
//! as all-zero instead of failing.

use hw_core::Schedule;

/// Summary of a headway sequence.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeadwayStats {
    /// Arithmetic mean, minutes.
    pub average:  f64,
    pub min:      i32,
    pub max:      i32,
    /// Population variance (divides by `n`, not `n - 1`), minutes².
    pub variance: f64,
}

impl HeadwayStats {
    pub const ZERO: HeadwayStats = HeadwayStats { average: 0.0, min: 0, max: 0, variance: 0.0 };

    /// Statistics of `schedule`'s headways.
    pub fn of(schedule: &Schedule) -> Self {
        summarize(&compute_headways(schedule))
    }
}

/// `start[i] - start[i-1]` for every consecutive pair, in order.
pub fn compute_headways(schedule: &Schedule) -> Vec<i32> {
    schedule
        .trips()
        .windows(2)
        .map(|w| w[1].start() - w[0].start())
        .collect()
}

/// Mean, min, max and population variance of `headways`.
///
/// Returns [`HeadwayStats::ZERO`] for an empty slice.
pub fn summarize(headways: &[i32]) -> HeadwayStats {
    let (Some(&min), Some(&max)) = (headways.iter().min(), headways.iter().max()) else {
        return HeadwayStats::ZERO;
    };

    let n = headways.len() as f64;
    let average = headways.iter().map(|&h| h as f64).sum::<f64>() / n;
    let variance = headways
        .iter()
        .map(|&h| {
            let d = h as f64 - average;
            d * d
        })
        .sum::<f64>()
        / n;

    HeadwayStats { average, min, max, variance }
}
