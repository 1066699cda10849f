//! Optimizer configuration.
//!
//! Typically loaded from a JSON file by the application crate and passed to
//! every optimizer entry point.  Nothing in the optimizer reads global state.

use crate::{ClockTime, ValidationError};

/// Tunables shared by all optimization calls.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizerConfig {
    /// Fixed running time of every trip, in minutes.  `end = start + this`.
    pub trip_duration_min: u32,

    /// Headway the efficiency score measures against.  Evaluation-time only;
    /// independent of the headway the rescheduler spaces trips at.
    pub scoring_target_headway: f64,

    /// Headway used when neither a forecast, an explicit target, nor an
    /// existing gap is available.  Still clamped to the route's bounds.
    pub default_headway: u32,

    /// Per-trip shifts larger than this (in either direction) are reported
    /// as delays/advances rather than minor adjustments.
    pub significant_adjustment_min: u32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            trip_duration_min:          90,
            scoring_target_headway:     15.0,
            default_headway:            15,
            significant_adjustment_min: 5,
        }
    }
}

impl OptimizerConfig {
    /// Reject trip durations longer than a service day.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.trip_duration_min > ClockTime::MINUTES_PER_DAY as u32 {
            return Err(ValidationError::InvalidTripDuration { minutes: self.trip_duration_min });
        }
        Ok(())
    }
}
