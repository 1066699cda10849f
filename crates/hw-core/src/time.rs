//! Time-of-day codec.
//!
//! # Design
//!
//! Every time in the optimizer is a `ClockTime`: a signed minute offset from
//! midnight of the service day.  All headway arithmetic happens on these
//! integers, so spacing is exact and comparisons are O(1).
//!
//! Conversion from text comes in two flavours:
//!
//! - [`ClockTime::parse_lenient`] never fails.  Malformed input (non-numeric
//!   parts, a missing minute, hour > 23, minute or second > 59) maps to
//!   midnight (`0`) so downstream arithmetic cannot fault on dirty data.
//! - [`str::parse`] (`FromStr`) is strict and reports what was wrong.  Callers
//!   that must not silently accept garbage (the CSV loaders) use this one.
//!
//! Formatting does **not** wrap at 24 h: minute 1500 renders as `25:00`.
//! Wrapping would break the ascending order of a schedule that runs past
//! midnight.  Schedules spanning midnight are out of scope; offsets beyond
//! 1440 are only ever produced by cascading a late schedule forward.

use std::fmt;
use std::str::FromStr;

use crate::HwError;

/// Minutes since midnight of the service day.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockTime(pub i32);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    pub const MINUTES_PER_DAY: i32 = 1_440;

    /// Build from an hour and minute.  Out-of-range values are not rejected;
    /// `from_hm(25, 0)` is minute 1500.
    #[inline]
    pub const fn from_hm(hour: u32, minute: u32) -> Self {
        ClockTime((hour * 60 + minute) as i32)
    }

    #[inline]
    pub fn minutes(self) -> i32 {
        self.0
    }

    /// The time `minutes` later (or earlier, if negative).  Saturates at the
    /// ends of `i32`.
    #[inline]
    pub fn offset(self, minutes: i32) -> Self {
        ClockTime(self.0.saturating_add(minutes))
    }

    /// Parse `H:MM`, `HH:MM` or `HH:MM:SS`, falling back to midnight on any
    /// malformed input.  Seconds are validated but truncated.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::MIDNIGHT)
    }

    /// Zero-padded `HH:MM` (same as `Display`).
    pub fn hhmm(self) -> String {
        self.to_string()
    }

    /// Zero-padded `HH:MM:00`.
    pub fn hhmmss(self) -> String {
        format!("{self}:00")
    }
}

impl std::ops::Add<i32> for ClockTime {
    type Output = ClockTime;
    #[inline]
    fn add(self, rhs: i32) -> ClockTime {
        self.offset(rhs)
    }
}

impl std::ops::Sub for ClockTime {
    type Output = i32;
    #[inline]
    fn sub(self, rhs: ClockTime) -> i32 {
        self.0.saturating_sub(rhs.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
    }
}

impl FromStr for ClockTime {
    type Err = HwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |why: &str| HwError::Parse(format!("invalid time {s:?}: {why}"));

        let mut parts = s.trim().split(':');
        let mut field = |name: &str, max: u32| -> Result<Option<u32>, HwError> {
            match parts.next() {
                None => Ok(None),
                Some(p) => {
                    let v: u32 = p
                        .trim()
                        .parse()
                        .map_err(|_| invalid(&format!("{name} is not a number")))?;
                    if v > max {
                        return Err(invalid(&format!("{name} {v} exceeds {max}")));
                    }
                    Ok(Some(v))
                }
            }
        };

        let hour = field("hour", 23)?.ok_or_else(|| invalid("empty"))?;
        let minute = field("minute", 59)?.ok_or_else(|| invalid("missing minute"))?;
        field("second", 59)?;
        if parts.next().is_some() {
            return Err(invalid("too many components"));
        }

        Ok(ClockTime::from_hm(hour, minute))
    }
}
