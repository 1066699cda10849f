//! Synthetic time-of-day demand profile.
//!
//! Used when no measured forecast exists (demos, smoke tests, new routes).
//! The base profile:
//!
//! | Hours       | Passengers/hour |
//! |-------------|-----------------|
//! | 06–09       | 45 (morning peak) |
//! | 10–16       | 25              |
//! | 17–19       | 50 (evening peak) |
//! | otherwise   | 10              |
//!
//! # Jitter
//!
//! With [`ProfileForecast::with_jitter`] every sample is scaled by a uniform
//! factor in `[1 - f, 1 + f]`.  The RNG is a `SmallRng` seeded from
//! `seed XOR (route * MIXING_CONSTANT)`, so a route always sees the same
//! forecast for the same seed regardless of which thread asks for it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use hw_core::RouteId;

use crate::{DemandSample, DemandSource};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Clone, Debug)]
struct Jitter {
    seed:     u64,
    fraction: f64,
}

/// A [`DemandSource`] that returns the same daily peak profile for every route.
#[derive(Clone, Debug)]
pub struct ProfileForecast {
    first_hour: u8,
    hours:      u8,
    jitter:     Option<Jitter>,
}

impl ProfileForecast {
    /// A noiseless 24-hour profile starting at hour 0.
    pub fn new() -> Self {
        Self { first_hour: 0, hours: 24, jitter: None }
    }

    /// Forecast `hours` consecutive hours starting at `first_hour`, wrapping
    /// past 23.  `hours` is capped at 24.
    pub fn with_hours(mut self, first_hour: u8, hours: u8) -> Self {
        self.first_hour = first_hour % 24;
        self.hours = hours.min(24);
        self
    }

    /// Scale each sample by a seeded uniform factor in `[1 - fraction, 1 + fraction]`.
    /// `fraction` is clamped to `[0, 1]`.
    pub fn with_jitter(mut self, seed: u64, fraction: f64) -> Self {
        self.jitter = Some(Jitter { seed, fraction: fraction.clamp(0.0, 1.0) });
        self
    }

    /// Noiseless passengers/hour for `hour`.
    pub fn base_demand(hour: u8) -> f64 {
        match hour {
            6..=9 => 45.0,
            17..=19 => 50.0,
            10..=16 => 25.0,
            _ => 10.0,
        }
    }
}

impl Default for ProfileForecast {
    fn default() -> Self {
        Self::new()
    }
}

impl DemandSource for ProfileForecast {
    fn forecast(&self, route: RouteId) -> Option<Vec<DemandSample>> {
        let mut rng = self.jitter.as_ref().map(|j| {
            let seed = j.seed ^ (route.0 as u64).wrapping_mul(MIXING_CONSTANT);
            (SmallRng::seed_from_u64(seed), j.fraction)
        });

        let samples = (0..self.hours)
            .map(|i| {
                let hour = (self.first_hour + i) % 24;
                let base = Self::base_demand(hour);
                let predicted = match rng.as_mut() {
                    Some((r, f)) if *f > 0.0 => base * r.gen_range(1.0 - *f..=1.0 + *f),
                    _ => base,
                };
                DemandSample { hour, predicted_passengers: predicted.max(0.0) }
            })
            .collect();

        Some(samples)
    }
}
