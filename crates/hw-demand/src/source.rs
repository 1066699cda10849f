//! `DemandSource` — capability for fetching a route's forecast.
//!
//! Passed explicitly into batch optimization; there is no process-wide model
//! handle.  Implementations range from "nothing" ([`NoForecast`]) through a
//! fixed table ([`StaticForecast`]) to a synthetic daily profile
//! ([`crate::ProfileForecast`]).

use std::collections::HashMap;

use hw_core::RouteId;

use crate::DemandSample;

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Provider of per-route hourly demand estimates.
///
/// # Contract
///
/// - Must not block on I/O; load data up front.
/// - Implementations must be `Send + Sync` (routes may be optimized on
///   Rayon threads).
pub trait DemandSource: Send + Sync {
    /// The forecast for `route`, or `None` when none is available.
    fn forecast(&self, route: RouteId) -> Option<Vec<DemandSample>>;
}

// ── No-op ─────────────────────────────────────────────────────────────────────

/// A source that never has a forecast.  The optimizer then falls back to the
/// route's explicit target or its existing spacing.
pub struct NoForecast;

impl DemandSource for NoForecast {
    #[inline]
    fn forecast(&self, _route: RouteId) -> Option<Vec<DemandSample>> {
        None
    }
}

// ── Static table ──────────────────────────────────────────────────────────────

/// A fixed per-route forecast table, typically loaded from CSV.
#[derive(Clone, Debug, Default)]
pub struct StaticForecast {
    by_route: HashMap<RouteId, Vec<DemandSample>>,
}

impl StaticForecast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the forecast of `route`.
    pub fn insert(&mut self, route: RouteId, samples: Vec<DemandSample>) {
        self.by_route.insert(route, samples);
    }

    /// Append one sample to `route`'s forecast.
    pub fn push(&mut self, route: RouteId, sample: DemandSample) {
        self.by_route.entry(route).or_default().push(sample);
    }

    pub fn with_route(mut self, route: RouteId, samples: Vec<DemandSample>) -> Self {
        self.insert(route, samples);
        self
    }

    /// Number of routes with a forecast.
    pub fn len(&self) -> usize {
        self.by_route.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_route.is_empty()
    }
}

impl DemandSource for StaticForecast {
    fn forecast(&self, route: RouteId) -> Option<Vec<DemandSample>> {
        self.by_route.get(&route).cloned()
    }
}
