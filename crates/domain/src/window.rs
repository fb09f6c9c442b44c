//! Time of day and the daily window during which playback may run.
//!
//! Windows never wrap past midnight: `start` must not be after `end`.
//! Both boundaries are inclusive at minute resolution, so with a window of
//! `09:00..22:00` the instants `09:00:00` and `22:00:00` are inside while
//! `22:00:01` is not.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A wall-clock `HH:MM` time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build a time of day from an hour (0–23) and minute (0–59).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeOfDay`] when either part is out of range.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidTimeOfDay(format!("{hour}:{minute}")))
    }

    fn as_naive(self) -> NaiveTime {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    /// Accepts `H:MM` or `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTimeOfDay(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(hour) || hour.len() > 2 || !digits(minute) || minute.len() != 2 {
            return Err(invalid());
        }
        let hour = hour.parse().map_err(|_| invalid())?;
        let minute = minute.parse().map_err(|_| invalid())?;
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// The same-day interval `[start, end]` during which playback is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl DayWindow {
    /// Build a window.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedWindow`] if `start` is after `end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Whether `now`, read as wall-clock time in its own zone, falls inside the window.
    #[must_use]
    pub fn contains<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let local = now.naive_local().time();
        local >= self.start.as_naive() && local <= self.end.as_naive()
    }
}

impl fmt::Display for DayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
