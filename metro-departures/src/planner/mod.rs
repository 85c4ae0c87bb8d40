//! Departure planner.
//!
//! This module answers: "which upcoming departures on my routes can I
//! catch from a stop near me?"
//!
//! A query narrows the schedule in stages, each a pure function from
//! borrowed input to a fresh collection: route whitelist and direction,
//! then a time-of-day window on stop times, then stops near the rider, and
//! finally a lookahead window around the anchor time with one departure
//! per trip, ranked by distance.

mod config;
mod error;
mod proximity;
mod query;
mod rank;
mod route_filter;
mod time_window;


pub use config::{DEFAULT_ROUTES, MAX_WINDOW_MINS, QueryConfig};
pub use error::QueryError;
pub use proximity::{ProximateStop, filter_by_proximity, referenced_stops};
pub use query::{DepartureBoard, Planner, QueryReport};
pub use rank::{RankedDeparture, lookahead_bounds, rank_upcoming};
pub use route_filter::{RouteFilteredTrips, filter_trips};
pub use time_window::{WindowedStopTime, filter_by_time_of_day};
