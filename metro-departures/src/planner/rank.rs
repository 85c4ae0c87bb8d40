//! Ranking of upcoming departures.
//!
//! Joins the windowed stop times with nearby stops, keeps the arrivals
//! around the anchor time and presents one row per trip, nearest stop
//! first.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{RouteId, StopId, TripId};

use super::proximity::ProximateStop;
use super::route_filter::RouteFilteredTrips;
use super::time_window::WindowedStopTime;

/// One upcoming departure: the nearest qualifying stop of a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDeparture {
    pub trip_id: TripId,
    pub route_id: RouteId,
    pub stop_id: StopId,
    pub arrival_time: NaiveTime,
    pub departure_time: NaiveTime,
    /// Planar distance from the point of interest, in degrees.
    pub distance_from_start: f64,
    pub stop_name: Option<String>,
    pub trip_headsign: Option<String>,
}

/// Clock-time bounds of the lookahead window around `anchor`.
///
/// Returns `(earliest, latest)`, where `earliest` is `anchor - margin` and
/// `latest` is `anchor + lookahead`, both reduced to time of day. If the
/// window crosses midnight `earliest` ends up after `latest`. Returns
/// `None` only if the arithmetic overflows the calendar.
pub fn lookahead_bounds(
    anchor: NaiveDateTime,
    lookahead: Duration,
    margin: Duration,
) -> Option<(NaiveTime, NaiveTime)> {
    let earliest = anchor.checked_sub_signed(margin)?.time();
    let latest = anchor.checked_add_signed(lookahead)?.time();
    Some((earliest, latest))
}

/// Rank upcoming departures near the rider.
///
/// 1. Keep stop times arriving between `anchor - margin` and
///    `anchor + lookahead` (clock time, inclusive).
/// 2. Keep those at a nearby stop and attach the stop's distance.
/// 3. Per trip, keep the row at the nearest stop. Equidistant rows are
///    resolved in favour of the one earlier in `windowed`.
/// 4. Attach the trip's route.
///
/// Returns departures sorted by distance, nearest first. The window must
/// lie within a single day; one that wraps past midnight yields nothing.
pub fn rank_upcoming(
    windowed: &[WindowedStopTime<'_>],
    proximate: &[ProximateStop<'_>],
    trips: &RouteFilteredTrips<'_>,
    anchor: NaiveDateTime,
    lookahead: Duration,
    margin: Duration,
) -> Vec<RankedDeparture> {
    let Some((earliest, latest)) = lookahead_bounds(anchor, lookahead, margin) else {
        warn!(%anchor, "Lookahead window overflows the calendar");
        return Vec::new();
    };

    if earliest > latest {
        warn!(
            %anchor,
            %earliest,
            %latest,
            "Lookahead window crosses midnight, no departures ranked"
        );
        return Vec::new();
    }

    let nearby: HashMap<&StopId, &ProximateStop<'_>> =
        proximate.iter().map(|p| (&p.stop.stop_id, p)).collect();

    let mut candidates: Vec<(&WindowedStopTime<'_>, &ProximateStop<'_>)> = windowed
        .iter()
        .filter(|w| earliest <= w.arrival && w.arrival <= latest)
        .filter_map(|w| nearby.get(w.stop_id()).map(|p| (w, *p)))
        .collect();

    // Stable: equal distances keep their stop-time order
    candidates.sort_by(|a, b| a.1.distance_from_start.total_cmp(&b.1.distance_from_start));

    // Keep first (nearest) of each trip; the result stays distance-sorted
    let mut seen: HashSet<&TripId> = HashSet::with_capacity(candidates.len());
    let ranked: Vec<RankedDeparture> = candidates
        .into_iter()
        .filter(|(w, _)| seen.insert(w.trip_id()))
        .filter_map(|(w, p)| {
            let trip = trips.get(w.trip_id())?;
            Some(RankedDeparture {
                trip_id: trip.trip_id.clone(),
                route_id: trip.route_id.clone(),
                stop_id: p.stop.stop_id.clone(),
                arrival_time: w.arrival,
                departure_time: w.departure,
                distance_from_start: p.distance_from_start,
                stop_name: p.stop.stop_name.clone(),
                trip_headsign: trip.trip_headsign.clone(),
            })
        })
        .collect();

    debug!(
        %earliest,
        %latest,
        departures = ranked.len(),
        "Ranking complete"
    );

    ranked
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Coordinate, Direction, TimeOfDayWindow};
    use crate::planner::proximity::{filter_by_proximity, referenced_stops};
    use crate::planner::route_filter::filter_trips;
    use crate::planner::time_window::filter_by_time_of_day;
    use crate::schedule::{Route, ScheduleSnapshot, Stop, StopTime, Trip};
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    const TRIPS: u8 = 6;
    const STOPS: u8 = 8;

    fn anchor() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 29)
            .unwrap()
            .and_hms_opt(16, 5, 0)
            .unwrap()
    }

    /// (trip, stop, minutes after 16:00) rows
    fn arb_stop_times() -> impl Strategy<Value = Vec<StopTime>> {
        prop::collection::vec((0..TRIPS, 0..STOPS, 0u32..60), 0..60).prop_map(|rows| {
            rows.into_iter()
                .map(|(trip, stop, mins)| {
                    let time = format!("16:{mins:02}:00");
                    StopTime {
                        trip_id: TripId::new(format!("t{trip}")),
                        stop_id: StopId::new(format!("s{stop}")),
                        arrival_time: Some(time.clone()),
                        departure_time: Some(time),
                    }
                })
                .collect()
        })
    }

    /// Stop positions on a coarse grid so equal distances happen
    fn arb_stops() -> impl Strategy<Value = Vec<Stop>> {
        prop::collection::vec((-4i32..=4, -4i32..=4), STOPS as usize).prop_map(|cells| {
            cells
                .into_iter()
                .enumerate()
                .map(|(i, (dy, dx))| Stop {
                    stop_id: StopId::new(format!("s{i}")),
                    stop_name: None,
                    stop_lat: 43.0 + f64::from(dy) * 0.001,
                    stop_lon: -89.0 + f64::from(dx) * 0.001,
                })
                .collect()
        })
    }

    fn snapshot(stop_times: Vec<StopTime>, stops: Vec<Stop>) -> ScheduleSnapshot {
        let routes = vec![Route {
            route_id: RouteId::new("A"),
            route_short_name: None,
            route_long_name: None,
        }];
        let trips = (0..TRIPS)
            .map(|i| Trip {
                trip_id: TripId::new(format!("t{i}")),
                route_id: RouteId::new("A"),
                direction_id: Direction::Inbound,
                trip_headsign: None,
            })
            .collect();
        ScheduleSnapshot::from_records(routes, trips, stop_times, stops).unwrap()
    }

    fn run(snap: &ScheduleSnapshot) -> Vec<RankedDeparture> {
        let wl: BTreeSet<RouteId> = [RouteId::new("A")].into_iter().collect();
        let trips = filter_trips(snap, &wl, Direction::Inbound).unwrap();
        let window = TimeOfDayWindow::parse("15:00:00", "18:00:00").unwrap();
        let windowed = filter_by_time_of_day(snap.stop_times(), &trips, window);
        let ids = referenced_stops(&windowed);
        let nearby = filter_by_proximity(snap.stops(), &ids, Coordinate::new(43.0, -89.0), 0.0045);
        rank_upcoming(
            &windowed,
            &nearby,
            &trips,
            anchor(),
            Duration::minutes(40),
            Duration::minutes(1),
        )
    }

    proptest! {
        /// At most one departure per trip
        #[test]
        fn per_trip_uniqueness(stop_times in arb_stop_times(), stops in arb_stops()) {
            let snap = snapshot(stop_times, stops);
            let ranked = run(&snap);

            let distinct: HashSet<&TripId> = ranked.iter().map(|d| &d.trip_id).collect();
            prop_assert_eq!(distinct.len(), ranked.len());
        }

        /// Departures are non-decreasing in distance
        #[test]
        fn sorted_by_distance(stop_times in arb_stop_times(), stops in arb_stops()) {
            let snap = snapshot(stop_times, stops);
            let ranked = run(&snap);

            for pair in ranked.windows(2) {
                prop_assert!(pair[0].distance_from_start <= pair[1].distance_from_start);
            }
        }

        /// Every departure is inside the lookahead window and radius, and is
        /// the nearest qualifying stop of its trip
        #[test]
        fn nearest_qualifying_stop(stop_times in arb_stop_times(), stops in arb_stops()) {
            let snap = snapshot(stop_times, stops);
            let ranked = run(&snap);
            let point = Coordinate::new(43.0, -89.0);
            let earliest = NaiveTime::from_hms_opt(16, 4, 0).unwrap();
            let latest = NaiveTime::from_hms_opt(16, 45, 0).unwrap();

            for d in &ranked {
                prop_assert!(earliest <= d.arrival_time && d.arrival_time <= latest);
                prop_assert!(d.distance_from_start <= 0.0045);

                let best = snap
                    .stop_times()
                    .iter()
                    .filter(|st| st.trip_id == d.trip_id)
                    .filter(|st| {
                        let t = crate::domain::parse_hhmmss(st.arrival_time.as_deref().unwrap()).unwrap();
                        earliest <= t && t <= latest
                    })
                    .filter_map(|st| snap.stop(&st.stop_id))
                    .map(|s| s.coordinate().planar_distance(&point))
                    .filter(|dist| *dist <= 0.0045)
                    .fold(f64::INFINITY, f64::min);
                prop_assert_eq!(d.distance_from_start, best);
            }
        }

        /// Same inputs, same output
        #[test]
        fn idempotent(stop_times in arb_stop_times(), stops in arb_stops()) {
            let snap = snapshot(stop_times, stops);
            prop_assert_eq!(run(&snap), run(&snap));
        }
    }
}
