//! `hw-optimizer` — headway-based schedule rebalancing.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`stats`]      | `HeadwayStats`, `compute_headways`, `summarize`            |
//! | [`efficiency`] | `efficiency_score`                                         |
//! | [`selector`]   | `select_headway`, `resolve_headway`, `HeadwayRule`         |
//! | [`reschedule`] | `reschedule` (cascading), `fill_window` (from scratch)     |
//! | [`analyze`]    | `analyze`, `OptimizationResult`, `TripAdjustment`, reasons |
//! | [`optimizer`]  | `optimize_schedule`, `generate_fresh_schedule`             |
//! | [`batch`]      | `optimize_routes` over many routes                         |
//! | [`cache`]      | `ResultCache`                                              |
//! | [`loader`]     | `load_trips_csv`, `load_trips_reader`                      |
//! | [`export`]     | `write_results_csv`, `write_results`                       |
//!
//! # Pipeline (summary)
//!
//! ```text
//! trips + constraints (+ forecast)
//!   → resolve_headway      (demand tier / explicit target / first gap / default, clamped)
//!   → reschedule           (anchor first trip, cascade at constant headway)
//!   → analyze              (stats + efficiency before/after, deltas, reasons)
//!   → OptimizationResult
//! ```
//!
//! Everything here is a pure function of its arguments.  The only shared
//! state is the opt-in [`ResultCache`].
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `serde`    | `Serialize` on all result types.                        |
//! | `parallel` | [`optimize_routes`] runs routes on Rayon's thread pool. |

pub mod analyze;
pub mod batch;
pub mod cache;
pub mod efficiency;
pub mod export;
pub mod loader;
pub mod optimizer;
pub mod reschedule;
pub mod selector;
pub mod stats;

#[cfg(test)]
mod tests;

pub use analyze::{
    AdjustmentKind, ImprovementMetrics, OptimizationReason, OptimizationResult, TripAdjustment,
    analyze,
};
pub use batch::{RouteOutcome, group_by_route, optimize_routes};
pub use cache::{CacheKey, ResultCache};
pub use efficiency::efficiency_score;
pub use export::{write_results, write_results_csv};
pub use loader::{load_trips_csv, load_trips_reader};
pub use optimizer::{FreshSchedule, FrequencyComparison, generate_fresh_schedule, optimize_schedule};
pub use reschedule::{fill_window, reschedule};
pub use selector::{HeadwayRule, ResolvedHeadway, demand_headway, resolve_headway, select_headway};
pub use stats::{HeadwayStats, compute_headways, summarize};
