//! Player commands — the vocabulary the controller speaks to a player backend.

use serde::{Deserialize, Serialize};

use crate::playback::PlaybackState;
use crate::volume::Volume;

/// A single operation sent to the player.
///
/// Used to label failures and to record calls in tests; backends translate
/// each variant into their own wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Clear the queue and load the configured playlist.
    PrepareMedia,
    CurrentState,
    CurrentVolume,
    SetVolume(Volume),
    SetRepeat(bool),
    SetRandom(bool),
    Next,
    Play,
    Pause,
    Stop,
}

impl std::fmt::Display for PlayerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrepareMedia => f.write_str("prepare_media"),
            Self::CurrentState => f.write_str("current_state"),
            Self::CurrentVolume => f.write_str("current_volume"),
            Self::SetVolume(volume) => write!(f, "set_volume({volume})"),
            Self::SetRepeat(enabled) => write!(f, "set_repeat({enabled})"),
            Self::SetRandom(enabled) => write!(f, "set_random({enabled})"),
            Self::Next => f.write_str("next"),
            Self::Play => f.write_str("play"),
            Self::Pause => f.write_str("pause"),
            Self::Stop => f.write_str("stop"),
        }
    }
}

/// How the controller makes the player inaudible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffCommand {
    #[default]
    Pause,
    Stop,
}

impl OffCommand {
    /// The player command issued for this policy.
    #[must_use]
    pub fn command(self) -> PlayerCommand {
        match self {
            Self::Pause => PlayerCommand::Pause,
            Self::Stop => PlayerCommand::Stop,
        }
    }

    /// The playback state the player is in once the command succeeded.
    #[must_use]
    pub fn resulting_state(self) -> PlaybackState {
        match self {
            Self::Pause => PlaybackState::Paused,
            Self::Stop => PlaybackState::Stopped,
        }
    }
}
