//! Optimizer entry points.
//!
//! | Function                     | Use                                              |
//! |------------------------------|--------------------------------------------------|
//! | [`optimize_schedule`]        | Respace a route's existing trips                 |
//! | [`generate_fresh_schedule`]  | Lay out a route's trips from scratch in a window |
//!
//! Both validate everything up front and return a [`ValidationError`]
//! before any computation.  Past validation they are total.

use tracing::debug;

use hw_core::{
    ClockTime, Constraints, OptimizerConfig, RouteId, Schedule, ServiceWindow, Trip,
    ValidationError,
};
use hw_demand::DemandSample;

use crate::{OptimizationResult, ResolvedHeadway, analyze, fill_window, reschedule, resolve_headway};

// ── Existing schedules ────────────────────────────────────────────────────────

/// Rebalance one route's trips.
///
/// # Errors
///
/// - [`ValidationError::InvalidHeadwayBounds`] if `constraints` are invalid.
/// - [`ValidationError::InvalidTripDuration`] if `config.trip_duration_min`
///   exceeds one day.
/// - [`ValidationError::InvalidDemand`] if a forecast sample is invalid.
/// - [`ValidationError::UnsortedSchedule`] if `trips` are not ascending by
///   start.  They are never re-sorted.
pub fn optimize_schedule(
    trips:       &[Trip],
    constraints: &Constraints,
    forecast:    Option<&[DemandSample]>,
    config:      &OptimizerConfig,
) -> Result<OptimizationResult, ValidationError> {
    constraints.validate()?;
    config.validate()?;
    validate_forecast(forecast)?;
    let before = Schedule::new(trips.to_vec())?;

    let headway = resolve_headway(Some(&before), constraints, forecast, config);
    debug!(
        route = ?before.route_id(),
        trips = before.len(),
        headway = headway.minutes,
        rule = %headway.rule,
        "resolved target headway"
    );

    let after = reschedule(&before, headway.minutes, config.trip_duration_min);
    let mut result = analyze(&before, after, config);
    result.headway = Some(headway);
    Ok(result)
}

// ── Fresh schedules ───────────────────────────────────────────────────────────

/// A schedule generated across a service window.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FreshSchedule {
    pub route_id: RouteId,
    pub window:   ServiceWindow,
    pub headway:  ResolvedHeadway,
    pub schedule: Schedule,
}

impl FreshSchedule {
    pub fn total_trips(&self) -> usize {
        self.schedule.len()
    }

    /// Departure times, in order.
    pub fn trip_times(&self) -> Vec<ClockTime> {
        self.schedule.iter().map(Trip::start).collect()
    }

    /// e.g. "Optimized for 8-minute headway based on demand".
    pub fn reason(&self) -> String {
        format!(
            "Optimized for {}-minute headway based on {}",
            self.headway.minutes, self.headway.rule
        )
    }
}

/// Generate `route`'s trips from scratch across `window`.
///
/// Headway resolution is the same as for [`optimize_schedule`] minus the
/// existing-gap rule, since there is no existing schedule.
///
/// # Errors
///
/// - [`ValidationError::EmptyWindow`] if `window.end <= window.start`.
/// - [`ValidationError::InvalidHeadwayBounds`] if `constraints` are invalid.
/// - [`ValidationError::InvalidTripDuration`] if `config.trip_duration_min`
///   exceeds one day.
/// - [`ValidationError::InvalidDemand`] if a forecast sample is invalid.
pub fn generate_fresh_schedule(
    route:       RouteId,
    window:      &ServiceWindow,
    constraints: &Constraints,
    forecast:    Option<&[DemandSample]>,
    config:      &OptimizerConfig,
) -> Result<FreshSchedule, ValidationError> {
    window.validate()?;
    constraints.validate()?;
    config.validate()?;
    validate_forecast(forecast)?;

    let headway = resolve_headway(None, constraints, forecast, config);
    let schedule = fill_window(route, window, headway.minutes, constraints, config.trip_duration_min);
    debug!(
        route = %route,
        window_start = %window.start,
        window_end = %window.end,
        headway = headway.minutes,
        trips = schedule.len(),
        "generated fresh schedule"
    );

    Ok(FreshSchedule { route_id: route, window: *window, headway, schedule })
}

// ── Frequency comparison ──────────────────────────────────────────────────────

/// How a fresh schedule's frequency compares with the service it replaces.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrequencyComparison {
    /// Minutes by which the headway shrank; 0 if it grew.
    pub headway_reduction:   u32,
    /// Trips gained; 0 if trips were lost.
    pub additional_trips:    usize,
    /// `(current - new) / current`, signed.  0 when the current headway is 0.
    pub efficiency_gain:     f64,
    /// Half the headway change, signed: riders arriving at random wait half a
    /// headway on average.
    pub wait_time_reduction: f64,
}

impl FrequencyComparison {
    pub fn between(current_headway: u32, current_trips: usize, fresh: &FreshSchedule) -> Self {
        let new_headway = fresh.headway.minutes;
        let change = current_headway as f64 - new_headway as f64;

        Self {
            headway_reduction:   current_headway.saturating_sub(new_headway),
            additional_trips:    fresh.total_trips().saturating_sub(current_trips),
            efficiency_gain:     if current_headway == 0 { 0.0 } else { change / current_headway as f64 },
            wait_time_reduction: change / 2.0,
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn validate_forecast(forecast: Option<&[DemandSample]>) -> Result<(), ValidationError> {
    forecast
        .unwrap_or_default()
        .iter()
        .try_for_each(DemandSample::validate)
}
