//! `hw-demand` — passenger demand forecasts consumed by the headway selector.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`sample`]  | `DemandSample`, `average_demand`                           |
//! | [`source`]  | `DemandSource` trait, `NoForecast`, `StaticForecast`       |
//! | [`profile`] | `ProfileForecast` (time-of-day peak profile)               |
//! | [`loader`]  | `load_forecast_csv`, `load_forecast_reader`                |
//!
//! The optimizer never reaches for a forecast itself.  Callers hand it either
//! a slice of samples for a single route or a `DemandSource` for a batch, so
//! the optimizer stays pure and every test can pin its inputs.

pub mod loader;
pub mod profile;
pub mod sample;
pub mod source;


pub use loader::{load_forecast_csv, load_forecast_reader};
pub use profile::ProfileForecast;
pub use sample::{DemandSample, average_demand};
pub use source::{DemandSource, NoForecast, StaticForecast};
