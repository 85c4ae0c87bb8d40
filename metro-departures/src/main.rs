use std::process::ExitCode;

use chrono::{Local, NaiveDateTime};
use tracing::error;
use tracing_subscriber::EnvFilter;

use metro_departures::planner::{Planner, QueryConfig, RankedDeparture};
use metro_departures::schedule::{SchedulePaths, ScheduleSnapshot};

/// Extracted Madison Metro feed, relative to the working directory.
const DEFAULT_GTFS_DIR: &str = "mmt_gtfs";

/// Format accepted for the `ANCHOR` override.
const ANCHOR_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let gtfs_dir = std::env::var("GTFS_DIR").unwrap_or_else(|_| DEFAULT_GTFS_DIR.to_string());

    // Replay a fixed time with ANCHOR, otherwise use the local clock
    let anchor = match std::env::var("ANCHOR") {
        Ok(value) => match NaiveDateTime::parse_from_str(&value, ANCHOR_FORMAT) {
            Ok(anchor) => anchor,
            Err(e) => {
                error!(%value, error = %e, "ANCHOR must look like 2025-09-29T16:05:00");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => Local::now().naive_local(),
    };

    let snapshot = match ScheduleSnapshot::load(&SchedulePaths::from_dir(&gtfs_dir)) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(%gtfs_dir, error = %e, "Failed to load schedule");
            return ExitCode::FAILURE;
        }
    };

    let planner = Planner::new(&snapshot, QueryConfig::default());
    let departures = match planner.upcoming_departures(anchor) {
        Ok(departures) => departures,
        Err(e) => {
            error!(error = %e, "Departure query failed");
            return ExitCode::FAILURE;
        }
    };

    let as_json = std::env::var("OUTPUT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if as_json {
        match serde_json::to_string_pretty(&departures) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!(error = %e, "Failed to serialize departures");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_board(&departures, anchor);
    }

    ExitCode::SUCCESS
}

fn print_board(departures: &[RankedDeparture], anchor: NaiveDateTime) {
    println!("Upcoming departures at {}", anchor.format("%Y-%m-%d %H:%M"));
    if departures.is_empty() {
        println!("  (none)");
        return;
    }
    for d in departures {
        println!(
            "  {:>3}  {}  {:<28}  {:.5}  {}",
            d.route_id.as_str(),
            d.arrival_time.format("%H:%M:%S"),
            d.stop_name.as_deref().unwrap_or(d.stop_id.as_str()),
            d.distance_from_start,
            d.trip_headsign.as_deref().unwrap_or(""),
        );
    }
}
