//! Efficiency score: one 0–100 number for a schedule's headway quality.
//!
//! ```text
//! headway_score    = max(0, 100 - |average - target| * 2)
//! variance_penalty = min(50, variance * 0.5)
//! score            = max(0, headway_score - variance_penalty)
//! ```
//!
//! Drifting from the target costs 2 points per minute.  Irregular spacing
//! costs half a point per minute² of variance, capped at 50 so one extreme
//! outlier cannot dominate.

use crate::HeadwayStats;

/// Points lost per minute the average headway is off target.
const DRIFT_WEIGHT: f64 = 2.0;
/// Points lost per minute² of headway variance.
const VARIANCE_WEIGHT: f64 = 0.5;
const MAX_VARIANCE_PENALTY: f64 = 50.0;

/// Score `stats` against the evaluation-time `target_headway`.
pub fn efficiency_score(stats: &HeadwayStats, target_headway: f64) -> f64 {
    let headway_score = (100.0 - (stats.average - target_headway).abs() * DRIFT_WEIGHT).max(0.0);
    let variance_penalty = (stats.variance * VARIANCE_WEIGHT).min(MAX_VARIANCE_PENALTY);
    (headway_score - variance_penalty).max(0.0)
}
