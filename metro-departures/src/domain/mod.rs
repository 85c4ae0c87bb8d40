//! Domain types for the departure board.
//!
//! This module contains the small value types shared by the schedule
//! loader and the planner. Types that carry an invariant enforce it at
//! construction time, so code that receives them can trust their validity.

mod coordinate;
mod direction;
mod ids;
mod time;

pub use coordinate::Coordinate;
pub use direction::{Direction, InvalidDirection};
pub use ids::{RouteId, StopId, TripId};
pub use time::{TimeError, TimeOfDayWindow, parse_hhmmss};
