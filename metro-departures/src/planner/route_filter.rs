//! Narrow trips to a route whitelist and a travel direction.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::domain::{Direction, RouteId, TripId};
use crate::schedule::{ScheduleSnapshot, Trip};

use super::error::QueryError;

/// Trips on whitelisted routes in one direction.
///
/// Borrowed from a [`ScheduleSnapshot`]; trips keep their file order and
/// are indexed by id for membership tests.
#[derive(Debug, Clone)]
pub struct RouteFilteredTrips<'a> {
    trips: Vec<&'a Trip>,
    by_id: HashMap<&'a TripId, &'a Trip>,
}

impl<'a> RouteFilteredTrips<'a> {
    /// Returns the trips, in file order.
    pub fn trips(&self) -> &[&'a Trip] {
        &self.trips
    }

    /// Look up a trip by id.
    pub fn get(&self, trip_id: &TripId) -> Option<&'a Trip> {
        self.by_id.get(trip_id).copied()
    }

    /// Check whether a trip is in the set.
    pub fn contains(&self, trip_id: &TripId) -> bool {
        self.by_id.contains_key(trip_id)
    }

    /// Distinct route ids present in the set.
    pub fn route_ids(&self) -> BTreeSet<&'a RouteId> {
        self.trips.iter().map(|t| &t.route_id).collect()
    }

    /// Number of trips per route.
    pub fn trip_counts(&self) -> BTreeMap<&'a RouteId, usize> {
        let mut counts = BTreeMap::new();
        for trip in &self.trips {
            *counts.entry(&trip.route_id).or_insert(0) += 1;
        }
        counts
    }

    /// Returns the number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Returns true if there are no trips.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Keep trips whose route is whitelisted and whose direction matches.
///
/// Trips pointing at a route that `routes.txt` does not define are
/// dropped. Afterwards every whitelisted route must still be represented:
/// a route with no remaining trips fails the query with
/// [`QueryError::DataIntegrity`], listing all such routes.
pub fn filter_trips<'a>(
    snapshot: &'a ScheduleSnapshot,
    whitelist: &BTreeSet<RouteId>,
    direction: Direction,
) -> Result<RouteFilteredTrips<'a>, QueryError> {
    let trips: Vec<&Trip> = snapshot
        .trips()
        .iter()
        .filter(|t| t.direction_id == direction)
        .filter(|t| whitelist.contains(&t.route_id))
        .filter(|t| snapshot.has_route(&t.route_id))
        .collect();

    let by_id = trips.iter().map(|&t| (&t.trip_id, t)).collect();
    let filtered = RouteFilteredTrips { trips, by_id };

    let present = filtered.route_ids();
    let missing: Vec<RouteId> = whitelist
        .iter()
        .filter(|r| !present.contains(r))
        .cloned()
        .collect();

    if !missing.is_empty() {
        return Err(QueryError::DataIntegrity { missing, direction });
    }

    debug!(
        trips = filtered.len(),
        routes = present.len(),
        %direction,
        "Route filter complete"
    );

    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Route;

    fn route(id: &str) -> Route {
        Route {
            route_id: RouteId::new(id),
            route_short_name: None,
            route_long_name: None,
        }
    }

    fn trip(id: &str, route_id: &str, direction: Direction) -> Trip {
        Trip {
            trip_id: TripId::new(id),
            route_id: RouteId::new(route_id),
            direction_id: direction,
            trip_headsign: None,
        }
    }

    fn whitelist(ids: &[&str]) -> BTreeSet<RouteId> {
        ids.iter().map(|s| RouteId::new(*s)).collect()
    }

    fn snapshot(routes: &[&str], trips: Vec<Trip>) -> ScheduleSnapshot {
        let routes = routes.iter().map(|r| route(r)).collect();
        ScheduleSnapshot::from_records(routes, trips, vec![], vec![]).unwrap()
    }

    #[test]
    fn keeps_whitelisted_routes_in_direction() {
        let snap = snapshot(
            &["A", "C", "80"],
            vec![
                trip("1", "A", Direction::Inbound),
                trip("2", "A", Direction::Outbound),
                trip("3", "C", Direction::Inbound),
                trip("4", "80", Direction::Inbound),
                trip("5", "C", Direction::Inbound),
            ],
        );

        let filtered = filter_trips(&snap, &whitelist(&["A", "C"]), Direction::Inbound).unwrap();

        let ids: Vec<&str> = filtered.trips().iter().map(|t| t.trip_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "5"]);
        assert!(filtered.contains(&TripId::new("3")));
        assert!(!filtered.contains(&TripId::new("2")));
        assert_eq!(
            filtered.get(&TripId::new("5")).map(|t| t.route_id.as_str()),
            Some("C")
        );
    }

    #[test]
    fn trip_counts_per_route() {
        let snap = snapshot(
            &["A", "C"],
            vec![
                trip("1", "A", Direction::Inbound),
                trip("2", "C", Direction::Inbound),
                trip("3", "C", Direction::Inbound),
            ],
        );

        let filtered = filter_trips(&snap, &whitelist(&["A", "C"]), Direction::Inbound).unwrap();
        let counts = filtered.trip_counts();

        assert_eq!(counts.get(&RouteId::new("A")), Some(&1));
        assert_eq!(counts.get(&RouteId::new("C")), Some(&2));
    }

    #[test]
    fn route_without_trips_in_direction_is_integrity_error() {
        let snap = snapshot(
            &["A", "38"],
            vec![
                trip("1", "A", Direction::Inbound),
                trip("2", "38", Direction::Outbound),
            ],
        );

        let err = filter_trips(&snap, &whitelist(&["A", "38"]), Direction::Inbound).unwrap_err();

        assert_eq!(
            err,
            QueryError::DataIntegrity {
                missing: vec![RouteId::new("38")],
                direction: Direction::Inbound,
            }
        );
    }

    #[test]
    fn unknown_route_is_integrity_error() {
        // Trips reference "F" but routes.txt does not define it
        let snap = snapshot(
            &["A"],
            vec![
                trip("1", "A", Direction::Inbound),
                trip("2", "F", Direction::Inbound),
            ],
        );

        let err = filter_trips(&snap, &whitelist(&["A", "F"]), Direction::Inbound).unwrap_err();

        assert!(matches!(err, QueryError::DataIntegrity { missing, .. } if missing == vec![RouteId::new("F")]));
    }

    #[test]
    fn lists_every_missing_route() {
        let snap = snapshot(&["A"], vec![trip("1", "A", Direction::Inbound)]);

        let err =
            filter_trips(&snap, &whitelist(&["A", "R", "C"]), Direction::Inbound).unwrap_err();

        match err {
            QueryError::DataIntegrity { missing, .. } => {
                assert_eq!(missing, vec![RouteId::new("C"), RouteId::new("R")]);
            }
            other => panic!("expected integrity error, got {other:?}"),
        }
    }
}
