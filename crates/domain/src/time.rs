//! Timestamps and deadline arithmetic.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// UTC instant used for transition bookkeeping and grace deadlines.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// The instant `duration` after `from`, or `None` for a zero duration.
///
/// Durations too large for chrono saturate to the latest representable
/// instant, so a huge grace period means "never expires" rather than
/// silently wrapping.
#[must_use]
pub fn deadline_after(from: Timestamp, duration: Duration) -> Option<Timestamp> {
    if duration.is_zero() {
        return None;
    }
    let delta = TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX);
    Some(from.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC))
}
