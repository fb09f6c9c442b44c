//! Sensor readings — one fresh sample per poll.

use serde::{Deserialize, Serialize};

/// A single sample from the sensor. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorReading {
    /// Ambient light in the bridge's raw lux-derived unit.
    LightLevel(u32),
    /// Whether someone is present.
    Presence(bool),
}

impl SensorReading {
    /// Which kind of sensor produced this reading.
    #[must_use]
    pub fn kind(self) -> SensorKind {
        match self {
            Self::LightLevel(_) => SensorKind::LightLevel,
            Self::Presence(_) => SensorKind::Presence,
        }
    }
}

impl std::fmt::Display for SensorReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LightLevel(level) => write!(f, "lightlevel={level}"),
            Self::Presence(present) => write!(f, "presence={present}"),
        }
    }
}

/// The deployment mode: which field of the sensor the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    #[default]
    LightLevel,
    Presence,
}

impl SensorKind {
    /// Dotted path of the reading inside the bridge's sensor document.
    #[must_use]
    pub fn field_path(self) -> &'static str {
        match self {
            Self::LightLevel => "state.lightlevel",
            Self::Presence => "state.presence",
        }
    }
}
