//! Query configuration for the departure planner.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveTime};

use crate::domain::{Coordinate, Direction, RouteId, TimeOfDayWindow};

use super::error::QueryError;

/// Longest lookahead or margin accepted, in minutes. The query window must
/// stay within one day.
pub const MAX_WINDOW_MINS: i64 = 24 * 60;

/// Routes watched by default.
pub const DEFAULT_ROUTES: [&str; 5] = ["A", "C", "R", "F", "38"];

/// Configuration parameters for a departure query.
///
/// Everything except the anchor time. The same config can be run against
/// any number of anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryConfig {
    /// Routes of interest. Every one of them must have trips in
    /// `direction`, or the query fails.
    pub route_whitelist: BTreeSet<RouteId>,

    /// Travel direction to keep.
    pub direction: Direction,

    /// Start of the time-of-day window for stop times.
    pub window_start: NaiveTime,

    /// End of the time-of-day window for stop times (inclusive).
    pub window_end: NaiveTime,

    /// Where the rider is.
    pub point_of_interest: Coordinate,

    /// Maximum planar distance from the point of interest, in degrees.
    /// 0.0045 degrees is roughly 500m at Madison's latitude.
    pub radius_degrees: f64,

    /// How far past the anchor to look for arrivals (minutes).
    pub lookahead_mins: i64,

    /// How far before the anchor an arrival may be and still show
    /// (minutes).
    pub margin_mins: i64,
}

impl QueryConfig {
    /// Create a new configuration with the given parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        route_whitelist: impl IntoIterator<Item = RouteId>,
        direction: Direction,
        window_start: NaiveTime,
        window_end: NaiveTime,
        point_of_interest: Coordinate,
        radius_degrees: f64,
        lookahead_mins: i64,
        margin_mins: i64,
    ) -> Self {
        Self {
            route_whitelist: route_whitelist.into_iter().collect(),
            direction,
            window_start,
            window_end,
            point_of_interest,
            radius_degrees,
            lookahead_mins,
            margin_mins,
        }
    }

    /// Replace the route whitelist.
    pub fn with_routes<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.route_whitelist = routes.into_iter().map(RouteId::new).collect();
        self
    }

    /// Set the travel direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the time-of-day window.
    pub fn with_time_window(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.window_start = start;
        self.window_end = end;
        self
    }

    /// Set the point of interest and search radius.
    pub fn with_point(mut self, point: Coordinate, radius_degrees: f64) -> Self {
        self.point_of_interest = point;
        self.radius_degrees = radius_degrees;
        self
    }

    /// Set the lookahead and margin around the anchor time.
    pub fn with_lookahead(mut self, lookahead_mins: i64, margin_mins: i64) -> Self {
        self.lookahead_mins = lookahead_mins;
        self.margin_mins = margin_mins;
        self
    }

    /// Returns the time-of-day window.
    pub fn time_window(&self) -> Result<TimeOfDayWindow, QueryError> {
        TimeOfDayWindow::new(self.window_start, self.window_end).ok_or_else(|| {
            QueryError::InvalidQuery(format!(
                "time window start {} is after end {}",
                self.window_start, self.window_end
            ))
        })
    }

    /// Returns the lookahead as a Duration.
    pub fn lookahead(&self) -> Result<Duration, QueryError> {
        window_duration("lookahead", self.lookahead_mins)
    }

    /// Returns the margin as a Duration.
    pub fn margin(&self) -> Result<Duration, QueryError> {
        window_duration("margin", self.margin_mins)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.route_whitelist.is_empty() {
            return Err(QueryError::InvalidQuery(
                "route whitelist is empty".to_string(),
            ));
        }

        self.time_window()?;

        if !self.radius_degrees.is_finite() || self.radius_degrees < 0.0 {
            return Err(QueryError::InvalidQuery(format!(
                "radius must be a non-negative number of degrees, got {}",
                self.radius_degrees
            )));
        }

        self.lookahead()?;
        self.margin()?;

        Ok(())
    }
}

/// Convert a lookahead or margin to a Duration, rejecting values that are
/// negative or longer than a day.
fn window_duration(name: &str, mins: i64) -> Result<Duration, QueryError> {
    if !(0..=MAX_WINDOW_MINS).contains(&mins) {
        return Err(QueryError::InvalidQuery(format!(
            "{name} must be between 0 and {MAX_WINDOW_MINS} minutes, got {mins}"
        )));
    }
    Duration::try_minutes(mins)
        .ok_or_else(|| QueryError::InvalidQuery(format!("{name} of {mins} minutes overflows")))
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            route_whitelist: DEFAULT_ROUTES.into_iter().map(RouteId::new).collect(),
            direction: Direction::Inbound, // eastbound
            window_start: NaiveTime::from_hms_opt(15, 0, 0).unwrap_or_default(),
            window_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            point_of_interest: Coordinate::new(43.07285, -89.40726),
            radius_degrees: 0.0045,
            lookahead_mins: 40,
            margin_mins: 1,
        }
    }
}
