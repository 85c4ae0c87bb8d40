//! Schedule time handling for GTFS stop times.
//!
//! GTFS provides times as "HH:MM:SS" strings measured from the start of the
//! service day, so hours may run past 23 for post-midnight service. The
//! filters here only ever work on same-day clock times: anything at or past
//! 24:00:00 is rejected rather than rolled over onto the next day.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a time of day from strict "HH:MM:SS" format.
///
/// Each field must be exactly two ASCII digits. Hours of 24 and above are
/// syntactically valid GTFS but are rejected here, as are out-of-range
/// minutes and seconds.
///
/// # Examples
///
/// ```
/// use metro_departures::domain::parse_hhmmss;
///
/// // Valid times
/// assert!(parse_hhmmss("00:00:00").is_ok());
/// assert!(parse_hhmmss("23:59:59").is_ok());
/// assert!(parse_hhmmss("16:05:30").is_ok());
///
/// // Post-midnight service and malformed strings
/// assert!(parse_hhmmss("24:20:00").is_err());
/// assert!(parse_hhmmss("9:05:00").is_err());
/// assert!(parse_hhmmss("16:05").is_err());
/// ```
pub fn parse_hhmmss(s: &str) -> Result<NaiveTime, TimeError> {
    // Must be exactly 8 characters: HH:MM:SS
    if s.len() != 8 {
        return Err(TimeError::new("expected HH:MM:SS format"));
    }

    let bytes = s.as_bytes();

    if bytes[2] != b':' || bytes[5] != b':' {
        return Err(TimeError::new("expected colons at positions 2 and 5"));
    }

    let hour =
        parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }

    let minute =
        parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    let second =
        parse_two_digits(&bytes[6..8]).ok_or_else(|| TimeError::new("invalid second digits"))?;
    if second > 59 {
        return Err(TimeError::new("second must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| TimeError::new("invalid time"))
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// An inclusive same-day interval of clock times.
///
/// The window never wraps past midnight: `start` is always at or before
/// `end`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDayWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeOfDayWindow {
    /// Create a window, or `None` if `start` is after `end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Parse a window from two "HH:MM:SS" strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, TimeError> {
        let start = parse_hhmmss(start)?;
        let end = parse_hhmmss(end)?;
        Self::new(start, end).ok_or_else(|| TimeError::new("window start is after its end"))
    }

    /// Returns the start of the window.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the end of the window.
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Check whether `time` lies inside the window, bounds included.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

impl fmt::Debug for TimeOfDayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDayWindow({self})")
    }
}

impl fmt::Display for TimeOfDayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}-{:02}:{:02}:{:02}",
            self.start.hour(),
            self.start.minute(),
            self.start.second(),
            self.end.hour(),
            self.end.minute(),
            self.end.second()
        )
    }
}
