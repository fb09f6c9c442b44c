//! Decision engine — maps a reading and the wall clock to a desired state.
//!
//! [`decide`] is a pure function: identical inputs always produce the
//! identical output, which keeps it testable without any IO.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::reading::SensorReading;
use crate::window::DayWindow;

/// Light level above which the room counts as lit.
pub const DEFAULT_LIGHT_THRESHOLD: u32 = 1000;

/// Whether playback should be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    On,
    Off,
}

impl From<bool> for DesiredState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl std::fmt::Display for DesiredState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// Per-deployment tuning of the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionRules {
    /// Readings strictly above this level count as light.
    pub light_threshold: u32,
    /// Whether presence readings are also restricted to the day window.
    pub presence_uses_window: bool,
}

impl Default for DecisionRules {
    fn default() -> Self {
        Self {
            light_threshold: DEFAULT_LIGHT_THRESHOLD,
            presence_uses_window: true,
        }
    }
}

/// Compute the desired playback state.
///
/// - Light level: on iff the level exceeds the threshold **and** `now` is
///   inside the window.
/// - Presence: on iff someone is present, additionally gated by the window
///   when [`DecisionRules::presence_uses_window`] is set.
#[must_use]
pub fn decide<Tz: TimeZone>(
    reading: SensorReading,
    now: &DateTime<Tz>,
    window: &DayWindow,
    rules: &DecisionRules,
) -> DesiredState {
    let on = match reading {
        SensorReading::LightLevel(level) => {
            level > rules.light_threshold && window.contains(now)
        }
        SensorReading::Presence(present) => {
            present && (!rules.presence_uses_window || window.contains(now))
        }
    };
    DesiredState::from(on)
}
