//! Narrow stops to those near a point of interest.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{Coordinate, StopId};
use crate::schedule::Stop;

use super::time_window::WindowedStopTime;

/// A stop within the search radius, with its distance from the rider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximateStop<'a> {
    pub stop: &'a Stop,
    /// Planar distance from the point of interest, in degrees.
    pub distance_from_start: f64,
}

/// Distinct stops served by the windowed stop times.
pub fn referenced_stops<'a>(windowed: &[WindowedStopTime<'a>]) -> HashSet<&'a StopId> {
    windowed.iter().map(|w| w.stop_id()).collect()
}

/// Keep stops in `stop_ids` whose planar distance from `point` is at most
/// `radius` degrees.
///
/// Output follows the order of `stops`; ranking happens later.
pub fn filter_by_proximity<'a>(
    stops: &'a [Stop],
    stop_ids: &HashSet<&StopId>,
    point: Coordinate,
    radius: f64,
) -> Vec<ProximateStop<'a>> {
    let nearby: Vec<ProximateStop<'a>> = stops
        .iter()
        .filter(|s| stop_ids.contains(&s.stop_id))
        .map(|stop| ProximateStop {
            stop,
            distance_from_start: stop.coordinate().planar_distance(&point),
        })
        .filter(|p| p.distance_from_start <= radius)
        .collect();

    debug!(
        candidates = stop_ids.len(),
        nearby = nearby.len(),
        radius,
        %point,
        "Proximity filter complete"
    );

    nearby
}
