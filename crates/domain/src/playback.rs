//! Playback state as reported by the player backend.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// What the player is doing right now. The backend is the source of truth;
/// the controller only caches the last value it observed or forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Unknown,
    Paused,
    Playing,
    Stopped,
}

impl PlaybackState {
    /// Whether audio is currently audible.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl std::str::FromStr for PlaybackState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "playing" => Ok(Self::Playing),
            "paused" => Ok(Self::Paused),
            "stopped" => Ok(Self::Stopped),
            other => Err(ValidationError::UnknownPlaybackState(other.to_string())),
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Paused => f.write_str("paused"),
            Self::Playing => f.write_str("playing"),
            Self::Stopped => f.write_str("stopped"),
        }
    }
}
