//! CSV trip loader.
//!
//! # CSV format
//!
//! One row per trip.  Start times are `HH:MM` or `HH:MM:SS` and are parsed
//! strictly: a malformed time fails the load rather than becoming midnight.
//!
//! ```csv
//! bus_id,route_id,start_time
//! 101,1,06:00
//! 102,1,06:20:00
//! 201,2,07:05
//! ```
//!
//! End times are not read; every trip ends `trip_duration_min` after it
//! starts.  Rows are returned in file order and are *not* sorted: ordering is
//! validated (and rejected) by the optimizer, never silently repaired.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use hw_core::{BusId, ClockTime, HwError, HwResult, RouteId, Trip};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TripRecord {
    bus_id:     u32,
    route_id:   u32,
    start_time: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load trips from a CSV file.
pub fn load_trips_csv(path: &Path, trip_duration_min: u32) -> HwResult<Vec<Trip>> {
    let file = std::fs::File::open(path).map_err(HwError::Io)?;
    load_trips_reader(file, trip_duration_min)
}

/// Like [`load_trips_csv`] but accepts any `Read` source.
pub fn load_trips_reader<R: Read>(reader: R, trip_duration_min: u32) -> HwResult<Vec<Trip>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut trips = Vec::new();

    for (row_no, result) in csv_reader.deserialize::<TripRecord>().enumerate() {
        let row = result.map_err(|e| HwError::Parse(e.to_string()))?;
        let start: ClockTime = row
            .start_time
            .parse()
            .map_err(|e| HwError::Parse(format!("row {}: {e}", row_no + 1)))?;
        trips.push(Trip::new(BusId(row.bus_id), RouteId(row.route_id), start, trip_duration_min));
    }

    Ok(trips)
}
