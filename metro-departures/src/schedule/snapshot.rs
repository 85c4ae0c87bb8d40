//! The loaded, read-only schedule.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{RouteId, StopId};

use super::error::ScheduleError;
use super::reader::{Table, read_table};
use super::records::{Route, Stop, StopTime, Trip};

/// Locations of the four GTFS tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePaths {
    pub routes: PathBuf,
    pub trips: PathBuf,
    pub stop_times: PathBuf,
    pub stops: PathBuf,
}

impl SchedulePaths {
    /// Standard GTFS file names inside an extracted feed directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            routes: dir.join(Table::Routes.file_name()),
            trips: dir.join(Table::Trips.file_name()),
            stop_times: dir.join(Table::StopTimes.file_name()),
            stops: dir.join(Table::Stops.file_name()),
        }
    }

    /// Returns the path configured for `table`.
    pub fn path(&self, table: Table) -> &Path {
        match table {
            Table::Routes => &self.routes,
            Table::Trips => &self.trips,
            Table::StopTimes => &self.stop_times,
            Table::Stops => &self.stops,
        }
    }
}

/// An immutable in-memory copy of the schedule tables.
///
/// Rows keep their file order. Routes and stops are indexed by id.
/// Nothing mutates a snapshot after construction, so one snapshot can be
/// shared by any number of concurrent queries.
#[derive(Debug, Clone)]
pub struct ScheduleSnapshot {
    routes: Vec<Route>,
    trips: Vec<Trip>,
    stop_times: Vec<StopTime>,
    stops: Vec<Stop>,

    /// route_id -> index into `routes`
    route_index: HashMap<RouteId, usize>,
    /// stop_id -> index into `stops`
    stop_index: HashMap<StopId, usize>,
}

impl ScheduleSnapshot {
    /// Load all four tables.
    ///
    /// Either every table loads and validates, or an error is returned and
    /// no snapshot exists.
    pub fn load(paths: &SchedulePaths) -> Result<Self, ScheduleError> {
        let routes = read_table(Table::Routes, paths.path(Table::Routes))?;
        let trips = read_table(Table::Trips, paths.path(Table::Trips))?;
        let stop_times = read_table(Table::StopTimes, paths.path(Table::StopTimes))?;
        let stops = read_table(Table::Stops, paths.path(Table::Stops))?;

        let snapshot = Self::from_records(routes, trips, stop_times, stops)?;

        info!(
            routes = snapshot.routes.len(),
            trips = snapshot.trips.len(),
            stop_times = snapshot.stop_times.len(),
            stops = snapshot.stops.len(),
            "Loaded schedule snapshot"
        );

        Ok(snapshot)
    }

    /// Build a snapshot from rows already in memory.
    ///
    /// Fails if a `route_id` or `stop_id` occurs more than once.
    pub fn from_records(
        routes: Vec<Route>,
        trips: Vec<Trip>,
        stop_times: Vec<StopTime>,
        stops: Vec<Stop>,
    ) -> Result<Self, ScheduleError> {
        let mut route_index = HashMap::with_capacity(routes.len());
        for (idx, route) in routes.iter().enumerate() {
            if route_index.insert(route.route_id.clone(), idx).is_some() {
                return Err(ScheduleError::DuplicateKey {
                    table: Table::Routes,
                    column: "route_id",
                    value: route.route_id.to_string(),
                });
            }
        }

        let mut stop_index = HashMap::with_capacity(stops.len());
        for (idx, stop) in stops.iter().enumerate() {
            if stop_index.insert(stop.stop_id.clone(), idx).is_some() {
                return Err(ScheduleError::DuplicateKey {
                    table: Table::Stops,
                    column: "stop_id",
                    value: stop.stop_id.to_string(),
                });
            }
        }

        Ok(Self {
            routes,
            trips,
            stop_times,
            stops,
            route_index,
            stop_index,
        })
    }

    /// All routes, in file order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// All trips, in file order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// All stop times, in file order.
    pub fn stop_times(&self) -> &[StopTime] {
        &self.stop_times
    }

    /// All stops, in file order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Look up a route by id.
    pub fn route(&self, route_id: &RouteId) -> Option<&Route> {
        self.route_index.get(route_id).map(|&idx| &self.routes[idx])
    }

    /// Check whether a route exists.
    pub fn has_route(&self, route_id: &RouteId) -> bool {
        self.route_index.contains_key(route_id)
    }

    /// Look up a stop by id.
    pub fn stop(&self, stop_id: &StopId) -> Option<&Stop> {
        self.stop_index.get(stop_id).map(|&idx| &self.stops[idx])
    }
}
