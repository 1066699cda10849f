//! Operating constraints: headway bounds and service windows.

use crate::{ClockTime, ValidationError};

// ── Constraints ───────────────────────────────────────────────────────────────

/// Spacing rules for one route, all in minutes.
///
/// Fields are public so boundary layers can fill them directly; call
/// [`Constraints::validate`] (every optimizer entry point does) before
/// relying on `0 < min_headway <= max_headway <= 1440`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    pub min_headway:    u32,
    pub max_headway:    u32,
    /// Explicit headway override.  Clamped into bounds before use.
    pub target_headway: Option<u32>,
}

impl Constraints {
    pub fn new(min_headway: u32, max_headway: u32) -> Self {
        Self { min_headway, max_headway, target_headway: None }
    }

    pub fn with_target(mut self, target_headway: u32) -> Self {
        self.target_headway = Some(target_headway);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_headway == 0
            || self.min_headway > self.max_headway
            || self.max_headway > ClockTime::MINUTES_PER_DAY as u32
        {
            return Err(ValidationError::InvalidHeadwayBounds {
                min: self.min_headway,
                max: self.max_headway,
            });
        }
        Ok(())
    }

    /// Clamp `headway` into `[min_headway, max_headway]`.
    ///
    /// Does not panic on inverted bounds (unlike `Ord::clamp`); the result is
    /// then `max_headway`, and `validate` is what rejects such constraints.
    #[inline]
    pub fn clamp(&self, headway: u32) -> u32 {
        headway.max(self.min_headway).min(self.max_headway)
    }

    /// The explicit target, clamped into bounds.
    pub fn clamped_target(&self) -> Option<u32> {
        self.target_headway.map(|t| self.clamp(t))
    }
}

impl Default for Constraints {
    /// 5–30 minute bounds with a 15 minute target.
    fn default() -> Self {
        Self::new(5, 30).with_target(15)
    }
}

// ── ServiceWindow ─────────────────────────────────────────────────────────────

/// The span of a service day used to generate a schedule from scratch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceWindow {
    pub start: ClockTime,
    pub end:   ClockTime,
}

impl ServiceWindow {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end <= self.start {
            return Err(ValidationError::EmptyWindow { start: self.start, end: self.end });
        }
        Ok(())
    }

    /// Length of the window in minutes.
    #[inline]
    pub fn span(&self) -> i32 {
        self.end - self.start
    }
}

impl Default for ServiceWindow {
    /// 06:00 – 22:00.
    fn default() -> Self {
        Self::new(ClockTime::from_hm(6, 0), ClockTime::from_hm(22, 0))
    }
}
