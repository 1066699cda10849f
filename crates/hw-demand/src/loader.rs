//! CSV forecast loader.
//!
//! # CSV format
//!
//! One row per route and hour:
//!
//! ```csv
//! route_id,hour,predicted_passengers
//! 1,6,42.5
//! 1,7,51
//! 2,6,12
//! ```
//!
//! Rows are appended to their route's forecast in file order.  Every row is
//! validated as a [`DemandSample`]; the first invalid row aborts the load.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use hw_core::{HwError, HwResult, RouteId};

use crate::{DemandSample, StaticForecast};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ForecastRecord {
    route_id:             u32,
    hour:                 u8,
    predicted_passengers: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a per-route forecast table from a CSV file.
pub fn load_forecast_csv(path: &Path) -> HwResult<StaticForecast> {
    let file = std::fs::File::open(path).map_err(HwError::Io)?;
    load_forecast_reader(file)
}

/// Like [`load_forecast_csv`] but accepts any `Read` source.
pub fn load_forecast_reader<R: Read>(reader: R) -> HwResult<StaticForecast> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut forecast = StaticForecast::new();

    for result in csv_reader.deserialize::<ForecastRecord>() {
        let row = result.map_err(|e| HwError::Parse(e.to_string()))?;
        let sample = DemandSample::new(row.hour, row.predicted_passengers)?;
        forecast.push(RouteId(row.route_id), sample);
    }

    Ok(forecast)
}
