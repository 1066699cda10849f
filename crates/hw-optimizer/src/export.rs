//! CSV export of optimized schedules.
//!
//! One row per trip:
//!
//! ```csv
//! bus_id,route_id,start_time,end_time,original_start_time,time_adjustment_minutes,adjustment_reason
//! 101,1,06:00,07:30,06:00,0,Minor adjustment for optimal spacing
//! 102,1,06:15,07:45,06:20,-5,Minor adjustment for optimal spacing
//! ```

use std::io::Write;
use std::path::Path;

use csv::Writer;

use hw_core::{HwError, HwResult};

use crate::OptimizationResult;

const HEADER: [&str; 7] = [
    "bus_id",
    "route_id",
    "start_time",
    "end_time",
    "original_start_time",
    "time_adjustment_minutes",
    "adjustment_reason",
];

/// Write every trip of `results` to a CSV file at `path`.
pub fn write_results_csv<'a, I>(path: &Path, results: I) -> HwResult<()>
where
    I: IntoIterator<Item = &'a OptimizationResult>,
{
    let file = std::fs::File::create(path)?;
    write_results(file, results)
}

/// Like [`write_results_csv`] but accepts any `Write` sink.
pub fn write_results<'a, W, I>(sink: W, results: I) -> HwResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a OptimizationResult>,
{
    let mut w = Writer::from_writer(sink);
    w.write_record(HEADER).map_err(csv_err)?;

    for result in results {
        for (trip, adj) in result.schedule.iter().zip(&result.adjustments) {
            w.write_record(&[
                trip.bus_id().to_string(),
                trip.route_id().to_string(),
                trip.start().hhmm(),
                trip.end().hhmm(),
                adj.original_start.hhmm(),
                adj.delta_minutes.to_string(),
                adj.kind.to_string(),
            ])
            .map_err(csv_err)?;
        }
    }

    w.flush()?;
    Ok(())
}

fn csv_err(e: csv::Error) -> HwError {
    HwError::Io(e.into())
}
