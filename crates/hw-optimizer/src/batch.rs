//! Multi-route batch optimization.
//!
//! Trips for many routes arrive as one flat list.  They are grouped by
//! `route_id` (keeping input order within each route) and each route is
//! optimized independently with its own forecast from a [`DemandSource`].
//!
//! A route whose trips are out of order fails on its own; the others are
//! still optimized.  Only invalid shared constraints or config fail the
//! whole batch.
//!
//! With the `parallel` feature routes run on Rayon's thread pool.  Output
//! order is ascending `RouteId` either way.

use std::collections::BTreeMap;

use tracing::{info, warn};

use hw_core::{Constraints, OptimizerConfig, RouteId, Trip, ValidationError};
use hw_demand::DemandSource;

use crate::{OptimizationResult, optimize_schedule};

/// One route's share of a batch.
#[derive(Debug)]
pub struct RouteOutcome {
    pub route_id: RouteId,
    pub result:   Result<OptimizationResult, ValidationError>,
}

/// Split `trips` by route, preserving relative order within each route.
pub fn group_by_route(trips: &[Trip]) -> BTreeMap<RouteId, Vec<Trip>> {
    let mut by_route: BTreeMap<RouteId, Vec<Trip>> = BTreeMap::new();
    for trip in trips {
        by_route.entry(trip.route_id()).or_default().push(*trip);
    }
    by_route
}

/// Optimize every route present in `trips`.
///
/// # Errors
///
/// [`ValidationError::InvalidHeadwayBounds`] or
/// [`ValidationError::InvalidTripDuration`] if the shared `constraints` or
/// `config` are invalid.  Per-route failures are reported in [`RouteOutcome::result`].
pub fn optimize_routes(
    trips:       &[Trip],
    constraints: &Constraints,
    source:      &dyn DemandSource,
    config:      &OptimizerConfig,
) -> Result<Vec<RouteOutcome>, ValidationError> {
    constraints.validate()?;
    config.validate()?;
    let groups: Vec<(RouteId, Vec<Trip>)> = group_by_route(trips).into_iter().collect();

    let optimize_one = |(route_id, route_trips): (RouteId, Vec<Trip>)| {
        let forecast = source.forecast(route_id);
        let result = optimize_schedule(&route_trips, constraints, forecast.as_deref(), config);
        if let Err(e) = &result {
            warn!(route = %route_id, error = %e, "route rejected");
        }
        RouteOutcome { route_id, result }
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<RouteOutcome> = groups.into_iter().map(optimize_one).collect();

    #[cfg(feature = "parallel")]
    let outcomes: Vec<RouteOutcome> = {
        use rayon::prelude::*;
        groups.into_par_iter().map(optimize_one).collect()
    };

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(routes = outcomes.len(), failed, trips = trips.len(), "batch optimized");

    Ok(outcomes)
}
