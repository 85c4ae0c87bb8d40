//! Schedule loading error types.

use std::path::PathBuf;

use super::Table;

/// Errors that can occur while loading a schedule snapshot.
///
/// Any of these aborts the whole load: a snapshot is never built from a
/// subset of the tables.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The file backing a table could not be opened or read
    #[error("cannot read {table} from {}", .path.display())]
    SourceUnavailable {
        table: Table,
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A required column is missing, or a value has the wrong type
    #[error("schema error in {table}: {detail}")]
    Schema { table: Table, detail: String },

    /// An identity column holds the same value twice
    #[error("duplicate {column} '{value}' in {table}")]
    DuplicateKey {
        table: Table,
        column: &'static str,
        value: String,
    },
}

impl ScheduleError {
    /// Returns the table the error relates to.
    pub fn table(&self) -> Table {
        match self {
            ScheduleError::SourceUnavailable { table, .. }
            | ScheduleError::Schema { table, .. }
            | ScheduleError::DuplicateKey { table, .. } => *table,
        }
    }
}
