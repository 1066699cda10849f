//! `hw-core` — foundational types for the `rust_headway` schedule optimizer.
//!
//! This crate is a dependency of every other `hw-*` crate.  It has no `hw-*`
//! dependencies and a single required external one (`thiserror`), plus
//! optional `serde`.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `BusId`, `RouteId`                                    |
//! | [`time`]        | `ClockTime` (the time codec)                          |
//! | [`trip`]        | `Trip`, `Schedule`                                    |
//! | [`constraints`] | `Constraints`, `ServiceWindow`                        |
//! | [`config`]      | `OptimizerConfig`                                     |
//! | [`error`]       | `ValidationError`, `HwError`, `HwResult`              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize` (and `Deserialize` on input types) to all |
//!           | public types.                                              |

pub mod config;
pub mod constraints;
pub mod error;
pub mod ids;
pub mod time;
pub mod trip;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::OptimizerConfig;
pub use constraints::{Constraints, ServiceWindow};
pub use error::{HwError, HwResult, ValidationError};
pub use ids::{BusId, RouteId};
pub use time::ClockTime;
pub use trip::{Schedule, Trip};
