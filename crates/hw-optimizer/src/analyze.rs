//! Before/after comparison of two schedules for the same route.
//!
//! # Metrics
//!
//! | Metric                        | Definition                                   |
//! |-------------------------------|----------------------------------------------|
//! | `improvement_minutes`         | `avg_before - avg_after` (signed)            |
//! | `efficiency_improvement_pct`  | `(after - before) / before * 100`, 0 if `before == 0` |
//! | `schedules_adjusted`          | trips whose start moved                      |
//! | `average_adjustment_minutes`  | mean `|after.start - before.start|`          |
//!
//! A positive `improvement_minutes` means headways shrank (more frequent
//! service).  The sign is kept so callers can tell the two directions apart.
//!
//! Trips are paired by position.  If the two schedules differ in length only
//! the common prefix is paired.

use std::fmt;

use hw_core::{BusId, ClockTime, OptimizerConfig, Schedule};

use crate::{HeadwayStats, ResolvedHeadway, efficiency_score};

// ── Per-trip adjustments ──────────────────────────────────────────────────────

/// How far one trip moved, classified against
/// `OptimizerConfig::significant_adjustment_min`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AdjustmentKind {
    /// Moved later by more than the threshold.
    Delayed(u32),
    /// Moved earlier by more than the threshold.
    Advanced(u32),
    /// Within the threshold, including no move at all.
    Minor,
}

impl AdjustmentKind {
    pub fn classify(delta_minutes: i32, threshold: u32) -> Self {
        let magnitude = delta_minutes.unsigned_abs();
        if magnitude <= threshold {
            AdjustmentKind::Minor
        } else if delta_minutes > 0 {
            AdjustmentKind::Delayed(magnitude)
        } else {
            AdjustmentKind::Advanced(magnitude)
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustmentKind::Delayed(m) => write!(f, "Delayed by {m} minutes to improve headway"),
            AdjustmentKind::Advanced(m) => write!(f, "Advanced by {m} minutes to reduce bunching"),
            AdjustmentKind::Minor => f.write_str("Minor adjustment for optimal spacing"),
        }
    }
}

/// One trip's move from its original to its new start time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TripAdjustment {
    pub bus_id:         BusId,
    pub original_start: ClockTime,
    pub new_start:      ClockTime,
    /// `new_start - original_start`; positive means later.
    pub delta_minutes:  i32,
    pub kind:           AdjustmentKind,
}

// ── Reasons ───────────────────────────────────────────────────────────────────

/// A human-readable justification.  Serialized as its display string.
#[derive(Clone, Debug, PartialEq)]
pub enum OptimizationReason {
    VarianceReduced,
    /// Average headway grew by this many minutes.
    HeadwayWidened(f64),
    /// Average headway shrank by this many minutes.
    HeadwayTightened(f64),
    /// Efficiency score rose by this many points.
    EfficiencyImproved(f64),
    TripsAdjusted { adjusted: usize, total: usize },
    /// Sentinel: none of the above applied.
    NoSignificantChange,
}

impl fmt::Display for OptimizationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VarianceReduced => f.write_str("Reduced schedule variance to prevent bus bunching"),
            Self::HeadwayWidened(m) => {
                write!(f, "Increased average headway by {m:.1} minutes, reducing service frequency")
            }
            Self::HeadwayTightened(m) => {
                write!(f, "Reduced average headway by {m:.1} minutes to increase service frequency")
            }
            Self::EfficiencyImproved(p) => write!(f, "Improved overall efficiency by {p:.1} points"),
            Self::TripsAdjusted { adjusted, total } => {
                write!(f, "Adjusted {adjusted} out of {total} trips for optimal spacing")
            }
            Self::NoSignificantChange => f.write_str("No significant optimizations needed"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for OptimizationReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Result ────────────────────────────────────────────────────────────────────

/// Quantitative deltas between a before/after pair.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImprovementMetrics {
    pub improvement_minutes:        f64,
    pub efficiency_improvement_pct: f64,
    pub total_trips:                usize,
    pub schedules_adjusted:         usize,
    pub average_adjustment_minutes: f64,
}

/// Everything an optimization call returns to its caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptimizationResult {
    /// The new schedule.
    pub schedule:          Schedule,
    /// Headway the rescheduler spaced trips at.  `None` when [`analyze`] was
    /// called directly on two caller-supplied schedules.
    pub headway:           Option<ResolvedHeadway>,
    pub stats_before:      HeadwayStats,
    pub stats_after:       HeadwayStats,
    pub efficiency_before: f64,
    pub efficiency_after:  f64,
    pub metrics:           ImprovementMetrics,
    /// One entry per paired trip, in schedule order.
    pub adjustments:       Vec<TripAdjustment>,
    /// Never empty: holds the sentinel when nothing changed.
    pub reasons:           Vec<OptimizationReason>,
}

impl OptimizationResult {
    /// `reasons` rendered as strings.
    pub fn reason_strings(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}

// ── Analysis ──────────────────────────────────────────────────────────────────

/// Compare `before` with `after` and package the result.
pub fn analyze(before: &Schedule, after: Schedule, config: &OptimizerConfig) -> OptimizationResult {
    let stats_before = HeadwayStats::of(before);
    let stats_after = HeadwayStats::of(&after);
    let efficiency_before = efficiency_score(&stats_before, config.scoring_target_headway);
    let efficiency_after = efficiency_score(&stats_after, config.scoring_target_headway);

    let adjustments: Vec<TripAdjustment> = before
        .iter()
        .zip(after.iter())
        .map(|(b, a)| {
            let delta = a.start() - b.start();
            TripAdjustment {
                bus_id:         a.bus_id(),
                original_start: b.start(),
                new_start:      a.start(),
                delta_minutes:  delta,
                kind:           AdjustmentKind::classify(delta, config.significant_adjustment_min),
            }
        })
        .collect();

    let schedules_adjusted = adjustments.iter().filter(|a| a.delta_minutes != 0).count();
    let average_adjustment_minutes = if adjustments.is_empty() {
        0.0
    } else {
        let total: u64 = adjustments.iter().map(|a| a.delta_minutes.unsigned_abs() as u64).sum();
        total as f64 / adjustments.len() as f64
    };

    let efficiency_improvement_pct = if efficiency_before == 0.0 {
        0.0
    } else {
        (efficiency_after - efficiency_before) / efficiency_before * 100.0
    };

    let metrics = ImprovementMetrics {
        improvement_minutes: stats_before.average - stats_after.average,
        efficiency_improvement_pct,
        total_trips: after.len(),
        schedules_adjusted,
        average_adjustment_minutes,
    };

    let reasons = build_reasons(
        &stats_before,
        &stats_after,
        efficiency_before,
        efficiency_after,
        schedules_adjusted,
        after.len(),
    );

    OptimizationResult {
        schedule: after,
        headway: None,
        stats_before,
        stats_after,
        efficiency_before,
        efficiency_after,
        metrics,
        adjustments,
        reasons,
    }
}

/// Reasons in fixed priority order; the sentinel alone if none applies.
fn build_reasons(
    before:            &HeadwayStats,
    after:             &HeadwayStats,
    efficiency_before: f64,
    efficiency_after:  f64,
    adjusted:          usize,
    total:             usize,
) -> Vec<OptimizationReason> {
    let mut out = Vec::new();

    if after.variance < before.variance {
        out.push(OptimizationReason::VarianceReduced);
    }

    if after.average > before.average {
        out.push(OptimizationReason::HeadwayWidened(after.average - before.average));
    } else if after.average < before.average {
        out.push(OptimizationReason::HeadwayTightened(before.average - after.average));
    }

    if efficiency_after > efficiency_before {
        out.push(OptimizationReason::EfficiencyImproved(efficiency_after - efficiency_before));
    }

    if adjusted > 0 {
        out.push(OptimizationReason::TripsAdjusted { adjusted, total });
    }

    if out.is_empty() {
        out.push(OptimizationReason::NoSignificantChange);
    }
    out
}
