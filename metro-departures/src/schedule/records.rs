//! Row types for the four GTFS tables the planner reads.
//!
//! Only the columns the planner uses are required. Display columns are
//! optional and default to `None` when absent; any other column in the
//! file is ignored.

use serde::Deserialize;

use crate::domain::{Coordinate, Direction, RouteId, StopId, TripId};

/// A row of `routes.txt`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Route {
    pub route_id: RouteId,
    #[serde(default)]
    pub route_short_name: Option<String>,
    #[serde(default)]
    pub route_long_name: Option<String>,
}

/// A row of `trips.txt`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trip {
    pub trip_id: TripId,
    pub route_id: RouteId,
    pub direction_id: Direction,
    #[serde(default)]
    pub trip_headsign: Option<String>,
}

/// A row of `stop_times.txt`.
///
/// Times are kept as the raw strings from the file. They are parsed by
/// the time-of-day filter, which decides what to do with values it cannot
/// interpret (including post-midnight hours such as "24:20:00").
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StopTime {
    pub trip_id: TripId,
    pub stop_id: StopId,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
}

/// A row of `stops.txt`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stop {
    pub stop_id: StopId,
    #[serde(default)]
    pub stop_name: Option<String>,
    pub stop_lat: f64,
    pub stop_lon: f64,
}

impl Stop {
    /// Returns the stop location.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.stop_lat, self.stop_lon)
    }
}
