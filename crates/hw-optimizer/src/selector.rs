//! Demand-driven target headway selection.
//!
//! # Demand tiers
//!
//! | Average demand (passengers/hour) | Headway (minutes) |
//! |----------------------------------|-------------------|
//! | > 30                             | 8                 |
//! | > 20                             | 12                |
//! | > 10                             | 15                |
//! | otherwise                        | 20                |
//!
//! # Resolution order
//!
//! [`resolve_headway`] picks the first rule that applies:
//!
//! 1. A non-empty forecast → demand tier.
//! 2. An explicit `Constraints::target_headway`.
//! 3. The gap between the existing schedule's first two trips.
//! 4. `OptimizerConfig::default_headway`.
//!
//! Whatever the rule, the result is clamped to the route's bounds.

use std::fmt;

use hw_core::{Constraints, OptimizerConfig, Schedule};
use hw_demand::{DemandSample, average_demand};

/// Which resolution rule produced a headway.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HeadwayRule {
    /// Chosen from the forecast's mean demand.
    Demand { average_demand: f64 },
    /// Taken from `Constraints::target_headway`.
    ExplicitTarget,
    /// Copied from the current schedule's first gap.
    ExistingGap,
    /// `OptimizerConfig::default_headway`.
    Default,
}

impl fmt::Display for HeadwayRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadwayRule::Demand { .. } => f.write_str("demand"),
            HeadwayRule::ExplicitTarget => f.write_str("the route's target headway"),
            HeadwayRule::ExistingGap => f.write_str("existing spacing"),
            HeadwayRule::Default => f.write_str("the default headway"),
        }
    }
}

/// A clamped target headway and the rule that produced it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResolvedHeadway {
    pub minutes: u32,
    pub rule:    HeadwayRule,
}

/// The unclamped demand tier for `avg_demand` passengers/hour.
pub fn demand_headway(avg_demand: f64) -> u32 {
    if avg_demand > 30.0 {
        8
    } else if avg_demand > 20.0 {
        12
    } else if avg_demand > 10.0 {
        15
    } else {
        20
    }
}

/// Demand tier for `avg_demand`, clamped to `constraints`' bounds.
pub fn select_headway(avg_demand: f64, constraints: &Constraints) -> u32 {
    constraints.clamp(demand_headway(avg_demand))
}

/// Resolve the target headway for one optimization call.
///
/// `existing` is the schedule being adjusted, or `None` when generating one
/// from scratch.  An empty forecast counts as no forecast.
pub fn resolve_headway(
    existing:    Option<&Schedule>,
    constraints: &Constraints,
    forecast:    Option<&[DemandSample]>,
    config:      &OptimizerConfig,
) -> ResolvedHeadway {
    if let Some(avg) = forecast.and_then(average_demand) {
        return ResolvedHeadway {
            minutes: select_headway(avg, constraints),
            rule:    HeadwayRule::Demand { average_demand: avg },
        };
    }

    if let Some(target) = constraints.clamped_target() {
        return ResolvedHeadway { minutes: target, rule: HeadwayRule::ExplicitTarget };
    }

    if let Some(gap) = existing.and_then(Schedule::first_gap) {
        return ResolvedHeadway {
            minutes: constraints.clamp(gap.max(0) as u32),
            rule:    HeadwayRule::ExistingGap,
        };
    }

    ResolvedHeadway {
        minutes: constraints.clamp(config.default_headway),
        rule:    HeadwayRule::Default,
    }
}
