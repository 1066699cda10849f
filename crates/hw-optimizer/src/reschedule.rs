//! The greedy rescheduler and the service-window generator.
//!
//! # Cascading spacing
//!
//! ```text
//! new_start[0] = start[0]
//! new_start[i] = new_start[i-1] + headway
//! new_end[i]   = new_start[i]   + trip_duration
//! ```
//!
//! Spacing is measured from the previous *output* trip, not from the
//! original time of trip `i`.  Correcting each pair against its original
//! neighbour would leave compounding drift in place; cascading removes it.
//!
//! Trips are never reordered: output position `i` carries input position
//! `i`'s bus and route, so `output[i].bus_id() == input[i].bus_id()` always.

use hw_core::{BusId, ClockTime, Constraints, RouteId, Schedule, ServiceWindow, Trip};

/// Respace `schedule` at a constant `headway`, anchored on its first trip.
///
/// Never fails: empty and single-trip schedules come back with only their
/// end times recomputed.
pub fn reschedule(schedule: &Schedule, headway: u32, trip_duration_min: u32) -> Schedule {
    let headway = i32::try_from(headway).unwrap_or(i32::MAX);
    let mut out = Vec::with_capacity(schedule.len());
    let mut prev: Option<ClockTime> = None;

    for trip in schedule {
        let start = match prev {
            None => trip.start(),
            Some(p) => p + headway,
        };
        out.push(trip.rescheduled(start, trip_duration_min));
        prev = Some(start);
    }

    Schedule::from_sorted(out)
}

/// Generate a schedule from scratch across `window`.
///
/// `headway` is clamped to `constraints` first, then
/// `floor(span / headway)` trips are laid out from `window.start`.  A trip
/// starting exactly at `window.end` is not generated.  Trips carry
/// [`BusId::INVALID`]; vehicle assignment happens downstream.
///
/// Callers validate `window` and `constraints` beforehand; an empty window
/// yields an empty schedule.
pub fn fill_window(
    route:             RouteId,
    window:            &ServiceWindow,
    headway:           u32,
    constraints:       &Constraints,
    trip_duration_min: u32,
) -> Schedule {
    let headway = i32::try_from(constraints.clamp(headway).max(1)).unwrap_or(i32::MAX);
    let trip_count = window.span().max(0) / headway;

    let trips = (0..trip_count)
        .map(|i| Trip::new(BusId::INVALID, route, window.start + i * headway, trip_duration_min))
        .collect();

    Schedule::from_sorted(trips)
}
