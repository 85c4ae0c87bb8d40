//! Running a departure query end to end.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::info;

use crate::domain::RouteId;
use crate::schedule::ScheduleSnapshot;

use super::config::QueryConfig;
use super::error::QueryError;
use super::proximity::{filter_by_proximity, referenced_stops};
use super::rank::{RankedDeparture, rank_upcoming};
use super::route_filter::filter_trips;
use super::time_window::filter_by_time_of_day;

/// Row counts after each stage of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryReport {
    /// Trips kept per whitelisted route.
    pub trips_by_route: BTreeMap<RouteId, usize>,
    /// Stop times inside the time-of-day window.
    pub windowed_stop_times: usize,
    /// Distinct stops served by those stop times.
    pub candidate_stops: usize,
    /// Candidate stops within the search radius.
    pub nearby_stops: usize,
}

/// Result of a departure query.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartureBoard {
    /// Departures, nearest stop first.
    pub departures: Vec<RankedDeparture>,

    /// How many rows survived each stage.
    pub report: QueryReport,
}

/// Departure planner over one schedule snapshot.
///
/// The planner holds no mutable state; the same planner can answer any
/// number of queries, from any number of threads.
#[derive(Debug, Clone)]
pub struct Planner<'a> {
    snapshot: &'a ScheduleSnapshot,
    config: QueryConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(snapshot: &'a ScheduleSnapshot, config: QueryConfig) -> Self {
        Self { snapshot, config }
    }

    /// Returns the query configuration.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Run every stage for `anchor` and return the board with its report.
    ///
    /// Fails without partial output if the configuration is invalid or a
    /// whitelisted route has no trips in the configured direction.
    pub fn run(&self, anchor: NaiveDateTime) -> Result<DepartureBoard, QueryError> {
        self.config.validate()?;
        let window = self.config.time_window()?;

        let trips = filter_trips(
            self.snapshot,
            &self.config.route_whitelist,
            self.config.direction,
        )?;

        let windowed = filter_by_time_of_day(self.snapshot.stop_times(), &trips, window);

        let stop_ids = referenced_stops(&windowed);
        let nearby = filter_by_proximity(
            self.snapshot.stops(),
            &stop_ids,
            self.config.point_of_interest,
            self.config.radius_degrees,
        );

        let departures = rank_upcoming(
            &windowed,
            &nearby,
            &trips,
            anchor,
            self.config.lookahead()?,
            self.config.margin()?,
        );

        let report = QueryReport {
            trips_by_route: trips
                .trip_counts()
                .into_iter()
                .map(|(route, count)| (route.clone(), count))
                .collect(),
            windowed_stop_times: windowed.len(),
            candidate_stops: stop_ids.len(),
            nearby_stops: nearby.len(),
        };

        info!(
            %anchor,
            trips = trips.len(),
            windowed_stop_times = report.windowed_stop_times,
            nearby_stops = report.nearby_stops,
            departures = departures.len(),
            "Departure query complete"
        );

        Ok(DepartureBoard { departures, report })
    }

    /// Upcoming departures for `anchor`, nearest stop first.
    pub fn upcoming_departures(
        &self,
        anchor: NaiveDateTime,
    ) -> Result<Vec<RankedDeparture>, QueryError> {
        self.run(anchor).map(|board| board.departures)
    }
}
