//! Upcoming bus departures near a rider.
//!
//! Answers: "which buses on my routes leave soon from a stop I can walk
//! to?" from a static GTFS schedule, ranked by how close the stop is.

pub mod domain;
pub mod planner;
pub mod schedule;
