//! Optional in-memory result cache.
//!
//! Entries are keyed by route and a fingerprint of *everything* that
//! determines the result: trips, constraints, forecast and config.  Keying
//! on the trips alone would serve stale results when only the forecast
//! changed.
//!
//! Entries are immutable `Arc` snapshots.  A result is computed outside the
//! lock and inserted only once fully assembled, so a reader can never observe
//! a partial one.  If two threads race on the same key the first insert wins
//! and both get the same `Arc`.  Validation errors are not cached.

use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::{FxHashMap, FxHasher};

use hw_core::{Constraints, OptimizerConfig, RouteId, Trip, ValidationError};
use hw_demand::DemandSample;

use crate::{OptimizationResult, optimize_schedule};

/// Cache key: the route plus a 64-bit request fingerprint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub route_id:    RouteId,
    pub fingerprint: u64,
}

impl CacheKey {
    /// Fingerprint an [`optimize_schedule`] request.  Empty requests map to
    /// [`RouteId::INVALID`].
    pub fn for_request(
        trips:       &[Trip],
        constraints: &Constraints,
        forecast:    Option<&[DemandSample]>,
        config:      &OptimizerConfig,
    ) -> Self {
        let mut h = FxHasher::default();
        trips.hash(&mut h);
        constraints.hash(&mut h);
        match forecast {
            None => 0u8.hash(&mut h),
            Some(samples) => {
                1u8.hash(&mut h);
                samples.len().hash(&mut h);
                for s in samples {
                    s.hour.hash(&mut h);
                    s.predicted_passengers.to_bits().hash(&mut h);
                }
            }
        }
        config.trip_duration_min.hash(&mut h);
        config.scoring_target_headway.to_bits().hash(&mut h);
        config.default_headway.hash(&mut h);
        config.significant_adjustment_min.hash(&mut h);

        Self {
            route_id:    trips.first().map_or(RouteId::INVALID, Trip::route_id),
            fingerprint: h.finish(),
        }
    }
}

/// Compute-once, read-many store of optimization results.
#[derive(Default)]
pub struct ResultCache {
    // Values are immutable once inserted, so a poisoned lock still guards
    // consistent data.
    entries: RwLock<FxHashMap<CacheKey, Arc<OptimizationResult>>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<OptimizationResult>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Return the cached result for this request, computing and storing it
    /// on a miss.
    pub fn get_or_optimize(
        &self,
        trips:       &[Trip],
        constraints: &Constraints,
        forecast:    Option<&[DemandSample]>,
        config:      &OptimizerConfig,
    ) -> Result<Arc<OptimizationResult>, ValidationError> {
        let key = CacheKey::for_request(trips, constraints, forecast, config);
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }

        let result = Arc::new(optimize_schedule(trips, constraints, forecast, config)?);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(entries.entry(key).or_insert(result)))
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
