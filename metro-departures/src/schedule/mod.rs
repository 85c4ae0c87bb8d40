//! Static GTFS schedule store.
//!
//! Loads `routes.txt`, `trips.txt`, `stop_times.txt` and `stops.txt` into a
//! [`ScheduleSnapshot`]. Fetching and unpacking the feed archive happens
//! elsewhere; this module only reads an extracted feed from disk.

mod error;
mod reader;
mod records;
mod snapshot;

pub use error::ScheduleError;
pub use reader::Table;
pub use records::{Route, Stop, StopTime, Trip};
pub use snapshot::{SchedulePaths, ScheduleSnapshot};
