//! CSV reading for GTFS tables.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ScheduleError;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// The GTFS tables the schedule store loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Routes,
    Trips,
    StopTimes,
    Stops,
}

impl Table {
    /// All tables, in load order.
    pub const ALL: [Table; 4] = [Table::Routes, Table::Trips, Table::StopTimes, Table::Stops];

    /// Returns the GTFS file name for this table.
    pub fn file_name(self) -> &'static str {
        match self {
            Table::Routes => "routes.txt",
            Table::Trips => "trips.txt",
            Table::StopTimes => "stop_times.txt",
            Table::Stops => "stops.txt",
        }
    }

    /// Columns that must be present in the header row.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Table::Routes => &["route_id"],
            Table::Trips => &["trip_id", "route_id", "direction_id"],
            Table::StopTimes => &["trip_id", "stop_id", "arrival_time", "departure_time"],
            Table::Stops => &["stop_id", "stop_lat", "stop_lon"],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Read every row of a table into `T`.
///
/// The header row is checked for the table's required columns before any
/// row is read. A leading UTF-8 byte-order mark is skipped and fields are
/// trimmed. The first row that fails to deserialize aborts the read.
pub(crate) fn read_table<T>(table: Table, path: &Path) -> Result<Vec<T>, ScheduleError>
where
    T: DeserializeOwned,
{
    let unavailable = |source: Box<dyn std::error::Error + Send + Sync>| {
        ScheduleError::SourceUnavailable {
            table,
            path: path.to_path_buf(),
            source,
        }
    };

    let file = File::open(path).map_err(|e| unavailable(Box::new(e)))?;
    let mut input = BufReader::new(file);

    let has_bom = input
        .fill_buf()
        .map_err(|e| unavailable(Box::new(e)))?
        .starts_with(UTF8_BOM);
    if has_bom {
        input.consume(UTF8_BOM.len());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| csv_error(table, path, e))?
        .clone();

    for column in table.required_columns() {
        if !headers.iter().any(|h| h == *column) {
            return Err(ScheduleError::Schema {
                table,
                detail: format!("missing required column '{column}'"),
            });
        }
    }

    let mut record = csv::StringRecord::new();
    let mut rows = Vec::new();

    while reader
        .read_record(&mut record)
        .map_err(|e| csv_error(table, path, e))?
    {
        let row = record
            .deserialize(Some(&headers))
            .map_err(|e| ScheduleError::Schema {
                table,
                detail: e.to_string(),
            })?;
        rows.push(row);
    }

    debug!(table = %table, rows = rows.len(), "Read GTFS table");

    Ok(rows)
}

/// Classify a csv error: I/O failures mean the source is unavailable,
/// anything else is a malformed file.
fn csv_error(table: Table, path: &Path, err: csv::Error) -> ScheduleError {
    if err.is_io_error() {
        ScheduleError::SourceUnavailable {
            table,
            path: path.to_path_buf(),
            source: Box::new(err),
        }
    } else {
        ScheduleError::Schema {
            table,
            detail: err.to_string(),
        }
    }
}
