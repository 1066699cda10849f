//! corridor — end-to-end demo of the rust_headway optimizer.
//!
//! Four routes share one downtown corridor during the morning peak.  Routes 1
//! and 2 have measured ridership forecasts; route 3 falls back to a synthetic
//! time-of-day profile.  Route 4's timetable was exported out of order and is
//! rejected on its own without holding up the others.
//!
//! Set `RUST_LOG=debug` to see which headway rule fired for each route.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hw_core::{ClockTime, Constraints, OptimizerConfig, RouteId, ServiceWindow};
use hw_demand::{DemandSample, DemandSource, ProfileForecast, StaticForecast, load_forecast_reader};
use hw_optimizer::{
    FrequencyComparison, ResultCache, generate_fresh_schedule, load_trips_reader, optimize_routes,
    write_results_csv,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 42;
const JITTER_FRACTION: f64 = 0.15;
const OUTPUT_DIR:      &str = "output/corridor";

const CONFIG_JSON: &str = r#"{
    "trip_duration_min": 90,
    "scoring_target_headway": 15.0,
    "significant_adjustment_min": 5
}"#;

// ── Input CSVs ────────────────────────────────────────────────────────────────

const TRIPS_CSV: &str = "\
bus_id,route_id,start_time\n\
101,1,06:00\n\
102,1,06:20\n\
103,1,06:50\n\
104,1,07:02\n\
105,1,07:40\n\
201,2,06:10\n\
202,2,06:14\n\
203,2,06:45\n\
204,2,07:30\n\
301,3,06:05\n\
302,3,06:30\n\
303,3,06:38\n\
304,3,07:20\n\
401,4,07:15\n\
402,4,06:45\n\
";

const FORECAST_CSV: &str = "\
route_id,hour,predicted_passengers\n\
1,6,42\n\
1,7,55\n\
1,8,38\n\
2,6,14\n\
2,7,22\n\
2,8,18\n\
";

// ── Demand source ─────────────────────────────────────────────────────────────

/// Measured forecasts where present, otherwise the synthetic profile.
struct MeasuredOrProfile {
    measured: StaticForecast,
    profile:  ProfileForecast,
}

impl DemandSource for MeasuredOrProfile {
    fn forecast(&self, route: RouteId) -> Option<Vec<DemandSample>> {
        self.measured.forecast(route).or_else(|| self.profile.forecast(route))
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== corridor — rust_headway optimizer ===");
    println!();

    // 1. Config and constraints.
    let config: OptimizerConfig = serde_json::from_str(CONFIG_JSON)?;
    let constraints = Constraints::new(6, 25).with_target(15);
    println!(
        "Constraints: headway {}–{} min (target {:?}), trip duration {} min",
        constraints.min_headway, constraints.max_headway, constraints.target_headway,
        config.trip_duration_min,
    );

    // 2. Load trips and forecasts.
    let trips = load_trips_reader(Cursor::new(TRIPS_CSV), config.trip_duration_min)?;
    let source = MeasuredOrProfile {
        measured: load_forecast_reader(Cursor::new(FORECAST_CSV))?,
        profile:  ProfileForecast::new().with_hours(6, 3).with_jitter(SEED, JITTER_FRACTION),
    };
    info!(trips = trips.len(), "loaded timetable");

    // 3. Optimize every route.
    let t0 = Instant::now();
    let outcomes = optimize_routes(&trips, &constraints, &source, &config)?;
    let elapsed = t0.elapsed();
    println!("Optimized {} routes in {:.3} ms", outcomes.len(), elapsed.as_secs_f64() * 1e3);
    println!();

    // 4. Per-route summary table.
    println!(
        "{:<6} {:>8} {:>10} {:>10} {:>9} {:>9}  {}",
        "Route", "Headway", "Avg before", "Avg after", "Eff. bef", "Eff. aft", "Rule"
    );
    println!("{}", "-".repeat(80));
    for outcome in &outcomes {
        match &outcome.result {
            Ok(r) => {
                let (minutes, rule) = r
                    .headway
                    .map_or((0, String::from("-")), |h| (h.minutes, h.rule.to_string()));
                println!(
                    "{:<6} {:>8} {:>10.1} {:>10.1} {:>9.1} {:>9.1}  {}",
                    outcome.route_id.to_string(),
                    minutes,
                    r.stats_before.average,
                    r.stats_after.average,
                    r.efficiency_before,
                    r.efficiency_after,
                    rule,
                );
            }
            Err(e) => println!("{:<6} rejected: {e}", outcome.route_id.to_string()),
        }
    }
    println!();

    let succeeded: Vec<_> = outcomes.iter().filter_map(|o| o.result.as_ref().ok()).collect();

    // 5. Trip-level detail and reasons for the first route.
    if let Some(first) = succeeded.first() {
        println!("{:<6} {:>9} {:>9} {:>7}  {}", "Bus", "Original", "New", "Delta", "Note");
        println!("{}", "-".repeat(72));
        for adj in &first.adjustments {
            println!(
                "{:<6} {:>9} {:>9} {:>+7}  {}",
                adj.bus_id.to_string(),
                adj.original_start.to_string(),
                adj.new_start.to_string(),
                adj.delta_minutes,
                adj.kind,
            );
        }
        println!();
        println!("Reasons (JSON): {}", serde_json::to_string_pretty(&first.reasons)?);
        println!("Metrics (JSON): {}", serde_json::to_string_pretty(&first.metrics)?);
        println!();
    }

    // 6. Fresh schedule for route 3 across the peak, compared with today's service.
    let route = RouteId(3);
    let window = ServiceWindow::new(ClockTime::from_hm(6, 0), ClockTime::from_hm(9, 0));
    let forecast = source.forecast(route);
    let fresh = generate_fresh_schedule(route, &window, &constraints, forecast.as_deref(), &config)?;
    let current_trips = trips.iter().filter(|t| t.route_id() == route).count();
    let comparison = FrequencyComparison::between(20, current_trips, &fresh);
    println!("Fresh schedule for route {route} ({} – {}):", window.start, window.end);
    println!("  {}", fresh.reason());
    println!(
        "  {} trips: {}",
        fresh.total_trips(),
        fresh.trip_times().iter().map(ToString::to_string).collect::<Vec<_>>().join(" "),
    );
    println!("  vs current: {}", serde_json::to_string(&comparison)?);
    println!();

    // 7. Cached re-optimization of route 1.
    let cache = ResultCache::new();
    let route1: Vec<_> = trips.iter().copied().filter(|t| t.route_id() == RouteId(1)).collect();
    let forecast1 = source.forecast(RouteId(1));
    for _ in 0..3 {
        cache.get_or_optimize(&route1, &constraints, forecast1.as_deref(), &config)?;
    }
    println!("Result cache: {} entry after 3 identical requests", cache.len());

    // 8. Write the optimized timetable.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let out_path = Path::new(OUTPUT_DIR).join("optimized_schedule.csv");
    write_results_csv(&out_path, succeeded.iter().copied())?;
    println!("Wrote {}", out_path.display());

    Ok(())
}
