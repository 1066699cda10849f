//! `Trip` and `Schedule`.
//!
//! A `Trip`'s end time is derived, never stored independently: it is always
//! `start + duration`, with the duration fixed for a whole optimization call.
//! Fields are private so that invariant cannot be broken after construction.
//!
//! A `Schedule` is the ordered trip list of one route.  It is ascending by
//! `start` and construction *rejects* anything else instead of sorting it:
//! external associations such as driver rosters are keyed by input position,
//! and a silent re-sort would desynchronize them.

use crate::{BusId, ClockTime, RouteId, ValidationError};

// ── Trip ──────────────────────────────────────────────────────────────────────

/// One scheduled departure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Trip {
    bus_id:   BusId,
    route_id: RouteId,
    start:    ClockTime,
    end:      ClockTime,
}

impl Trip {
    pub fn new(bus_id: BusId, route_id: RouteId, start: ClockTime, duration_min: u32) -> Self {
        Self {
            bus_id,
            route_id,
            start,
            end: start + i32::try_from(duration_min).unwrap_or(i32::MAX),
        }
    }

    #[inline]
    pub fn bus_id(&self) -> BusId {
        self.bus_id
    }

    #[inline]
    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    #[inline]
    pub fn start(&self) -> ClockTime {
        self.start
    }

    #[inline]
    pub fn end(&self) -> ClockTime {
        self.end
    }

    /// Same vehicle and route, moved to `start`.
    pub fn rescheduled(&self, start: ClockTime, duration_min: u32) -> Self {
        Self::new(self.bus_id, self.route_id, start, duration_min)
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// The trips of one route, ascending by start time.
///
/// May be empty or hold a single trip; headway statistics for those cases
/// are defined as all-zero rather than failing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Schedule {
    trips: Vec<Trip>,
}

impl Schedule {
    /// Validate ordering and wrap `trips`.
    ///
    /// Equal consecutive start times are accepted; a trip starting before its
    /// predecessor is rejected with [`ValidationError::UnsortedSchedule`].
    pub fn new(trips: Vec<Trip>) -> Result<Self, ValidationError> {
        if let Some(i) = trips.windows(2).position(|w| w[1].start < w[0].start) {
            return Err(ValidationError::UnsortedSchedule {
                index:    i + 1,
                start:    trips[i + 1].start,
                previous: trips[i].start,
            });
        }
        Ok(Self { trips })
    }

    /// Wrap trips the caller has produced in ascending order.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `trips` is not ascending by start.
    pub fn from_sorted(trips: Vec<Trip>) -> Self {
        debug_assert!(
            trips.is_sorted_by_key(|t| t.start),
            "Schedule::from_sorted given unsorted trips"
        );
        Self { trips }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Read-only slice of all trips (ascending by start).
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }

    pub fn first(&self) -> Option<&Trip> {
        self.trips.first()
    }

    /// The route of the first trip, if any.
    pub fn route_id(&self) -> Option<RouteId> {
        self.trips.first().map(Trip::route_id)
    }

    /// Gap between the first two departures, if there are at least two.
    pub fn first_gap(&self) -> Option<i32> {
        match self.trips.as_slice() {
            [a, b, ..] => Some(b.start - a.start),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Trip;
    type IntoIter = std::slice::Iter<'a, Trip>;

    fn into_iter(self) -> Self::IntoIter {
        self.trips.iter()
    }
}
