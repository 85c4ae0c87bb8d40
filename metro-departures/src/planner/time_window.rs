//! Narrow stop times to a same-day clock window.

use chrono::NaiveTime;
use tracing::debug;

use crate::domain::{StopId, TimeOfDayWindow, TripId, parse_hhmmss};
use crate::schedule::StopTime;

use super::route_filter::RouteFilteredTrips;

/// A stop time whose arrival and departure both parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowedStopTime<'a> {
    pub stop_time: &'a StopTime,
    pub arrival: NaiveTime,
    pub departure: NaiveTime,
}

impl<'a> WindowedStopTime<'a> {
    /// Returns the trip this stop time belongs to.
    pub fn trip_id(&self) -> &'a TripId {
        &self.stop_time.trip_id
    }

    /// Returns the stop being served.
    pub fn stop_id(&self) -> &'a StopId {
        &self.stop_time.stop_id
    }
}

/// Parse both times of a row, or `None` if either is missing or malformed.
///
/// Post-midnight values like "24:20:00" count as malformed: they belong to
/// the previous service day and are never shifted onto the next one.
fn parse_times(stop_time: &StopTime) -> Option<(NaiveTime, NaiveTime)> {
    let arrival = parse_hhmmss(stop_time.arrival_time.as_deref()?).ok()?;
    let departure = parse_hhmmss(stop_time.departure_time.as_deref()?).ok()?;
    Some((arrival, departure))
}

/// Keep stop times on `trips` whose arrival and departure both fall inside
/// `window`, bounds included.
///
/// Rows with unparseable times are dropped silently; they are not errors.
/// Input order is preserved.
pub fn filter_by_time_of_day<'a>(
    stop_times: &'a [StopTime],
    trips: &RouteFilteredTrips<'_>,
    window: TimeOfDayWindow,
) -> Vec<WindowedStopTime<'a>> {
    let mut on_trips = 0usize;
    let mut unparseable = 0usize;

    let windowed: Vec<WindowedStopTime<'a>> = stop_times
        .iter()
        .filter(|st| trips.contains(&st.trip_id))
        .filter_map(|st| {
            on_trips += 1;
            match parse_times(st) {
                Some((arrival, departure)) => Some(WindowedStopTime {
                    stop_time: st,
                    arrival,
                    departure,
                }),
                None => {
                    unparseable += 1;
                    None
                }
            }
        })
        .filter(|w| window.contains(w.arrival) && window.contains(w.departure))
        .collect();

    debug!(
        on_trips,
        unparseable,
        kept = windowed.len(),
        %window,
        "Time-of-day filter complete"
    );

    windowed
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Direction, RouteId};
    use crate::planner::route_filter::filter_trips;
    use crate::schedule::{Route, ScheduleSnapshot, Trip};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    /// Raw GTFS-ish time strings, including post-midnight hours
    fn arb_raw_time() -> impl Strategy<Value = String> {
        prop_oneof![
            8 => (0u32..30, 0u32..60, 0u32..60)
                .prop_map(|(h, m, s)| format!("{h:02}:{m:02}:{s:02}")),
            1 => Just(String::new()),
            1 => "[0-9:]{0,9}",
        ]
    }

    fn arb_stop_times() -> impl Strategy<Value = Vec<StopTime>> {
        prop::collection::vec((0u8..3, arb_raw_time(), arb_raw_time()), 0..50).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (trip, arr, dep))| StopTime {
                    trip_id: TripId::new(format!("{trip}")),
                    stop_id: StopId::new(format!("s{i}")),
                    arrival_time: (!arr.is_empty()).then_some(arr),
                    departure_time: (!dep.is_empty()).then_some(dep),
                })
                .collect()
        })
    }

    fn arb_window() -> impl Strategy<Value = TimeOfDayWindow> {
        (0u32..86_400, 0u32..86_400).prop_map(|(x, y)| {
            let start = NaiveTime::from_num_seconds_from_midnight_opt(x.min(y), 0).unwrap();
            let end = NaiveTime::from_num_seconds_from_midnight_opt(x.max(y), 0).unwrap();
            TimeOfDayWindow::new(start, end).unwrap()
        })
    }

    proptest! {
        /// Every kept row parsed cleanly, lies inside the window and
        /// belongs to a filtered trip
        #[test]
        fn time_window_closure(stop_times in arb_stop_times(), window in arb_window()) {
            use chrono::Timelike;

            let routes = vec![Route {
                route_id: RouteId::new("A"),
                route_short_name: None,
                route_long_name: None,
            }];
            let trips = vec![
                Trip { trip_id: TripId::new("0"), route_id: RouteId::new("A"), direction_id: Direction::Inbound, trip_headsign: None },
                Trip { trip_id: TripId::new("1"), route_id: RouteId::new("A"), direction_id: Direction::Outbound, trip_headsign: None },
            ];
            let snap = ScheduleSnapshot::from_records(routes, trips, stop_times, vec![]).unwrap();
            let wl: BTreeSet<RouteId> = [RouteId::new("A")].into_iter().collect();
            let filtered = filter_trips(&snap, &wl, Direction::Inbound).unwrap();

            let windowed = filter_by_time_of_day(snap.stop_times(), &filtered, window);

            for w in &windowed {
                prop_assert_eq!(w.trip_id().as_str(), "0");
                prop_assert!(window.contains(w.arrival));
                prop_assert!(window.contains(w.departure));
                prop_assert!(w.arrival.hour() < 24);
                prop_assert_eq!(Some(w.arrival), w.stop_time.arrival_time.as_deref().and_then(|s| parse_hhmmss(s).ok()));
                prop_assert_eq!(Some(w.departure), w.stop_time.departure_time.as_deref().and_then(|s| parse_hhmmss(s).ok()));
            }
        }
    }
}
