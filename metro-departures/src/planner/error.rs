//! Planner error types.

use crate::domain::{Direction, RouteId};

/// Errors from running a departure query.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    /// Whitelisted routes have no trips in the requested direction.
    ///
    /// This means the schedule disagrees with the query's assumptions, so
    /// the query is aborted rather than answered with a misleadingly empty
    /// board.
    #[error(
        "no trips in direction {direction} for whitelisted routes: {}",
        join_ids(.missing)
    )]
    DataIntegrity {
        missing: Vec<RouteId>,
        direction: Direction,
    },

    /// The query configuration is unusable
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

fn join_ids(ids: &[RouteId]) -> String {
    ids.iter()
        .map(RouteId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
