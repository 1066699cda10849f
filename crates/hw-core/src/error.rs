//! Error types.
//!
//! The optimizer core has exactly one failure mode: input that is rejected
//! before any computation starts.  That is [`ValidationError`].  Everything
//! that touches the outside world (CSV loaders, exporters) returns the wider
//! [`HwError`], which wraps a `ValidationError` as one variant.

use thiserror::Error;

use crate::ClockTime;

/// Malformed or out-of-order input, rejected before computation begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("schedule is not ascending: trip {index} starts at {start}, before {previous}")]
    UnsortedSchedule {
        index:    usize,
        start:    ClockTime,
        previous: ClockTime,
    },

    #[error("invalid headway bounds: need 0 < min ({min}) <= max ({max}) <= 1440")]
    InvalidHeadwayBounds { min: u32, max: u32 },

    #[error("invalid trip duration: {minutes} min exceeds one day")]
    InvalidTripDuration { minutes: u32 },

    #[error("empty service window: end {end} is not after start {start}")]
    EmptyWindow { start: ClockTime, end: ClockTime },

    #[error("invalid demand sample: {passengers} passengers at hour {hour}")]
    InvalidDemand { hour: u8, passengers: f64 },
}

/// The top-level error type for I/O-facing `hw-*` code.
#[derive(Debug, Error)]
pub enum HwError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `hw-*` crates.
pub type HwResult<T> = Result<T, HwError>;
