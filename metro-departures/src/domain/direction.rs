//! Trip direction codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a `direction_id` is not 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction_id {0}: must be 0 or 1")]
pub struct InvalidDirection(pub u8);

/// The GTFS `direction_id` of a trip.
///
/// GTFS only distinguishes the two travel directions of a route; which
/// compass direction each value means is agency-specific. Madison Metro
/// uses 1 for eastbound service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    /// `direction_id = 0`
    Outbound,
    /// `direction_id = 1`
    Inbound,
}

impl Direction {
    /// Returns the raw GTFS code.
    pub fn code(self) -> u8 {
        match self {
            Direction::Outbound => 0,
            Direction::Inbound => 1,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Outbound),
            1 => Ok(Direction::Inbound),
            other => Err(InvalidDirection(other)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction.code()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(Direction::try_from(0u8), Ok(Direction::Outbound));
        assert_eq!(Direction::try_from(1u8), Ok(Direction::Inbound));
        assert_eq!(Direction::Inbound.code(), 1);
        assert_eq!(u8::from(Direction::Outbound), 0);
    }

    #[test]
    fn reject_other_codes() {
        assert_eq!(Direction::try_from(2u8), Err(InvalidDirection(2)));
        assert_eq!(
            InvalidDirection(7).to_string(),
            "invalid direction_id 7: must be 0 or 1"
        );
    }
}
