//! Backend selection — one concrete player type for both backends.

use luxplay_adapter_mopidy::{MopidyError, MopidyPlayer};
use luxplay_adapter_mpc::MpcPlayer;
use luxplay_app::ports::PlayerSink;
use luxplay_domain::error::PlayerCommandError;
use luxplay_domain::playback::PlaybackState;
use luxplay_domain::volume::Volume;

use crate::config::PlayerSettings;

/// The player backend chosen at startup.
pub enum Player {
    Mpc(MpcPlayer),
    Mopidy(MopidyPlayer),
}

impl Player {
    /// Build the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the Mopidy HTTP client cannot be built.
    pub fn from_settings(settings: &PlayerSettings) -> Result<Self, MopidyError> {
        Ok(match settings {
            PlayerSettings::Mpc(config) => Self::Mpc(MpcPlayer::new(config.clone())),
            PlayerSettings::Mopidy(config) => Self::Mopidy(MopidyPlayer::new(config)?),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Mpc(_) => "mpc",
            Self::Mopidy(_) => "mopidy",
        }
    }
}

impl PlayerSink for Player {
    async fn prepare_media(&self) -> Result<(), PlayerCommandError> {
        match self {
            Self::Mpc(player) => player.prepare_media().await,
            Self::Mopidy(player) => player.prepare_media().await,
        }
    }

    async fn current_state(&self) -> Result<PlaybackState, PlayerCommandError> {
        match self {
            Self::Mpc(player) => player.current_state().await,
            Self::Mopidy(player) => player.current_state().await,
        }
    }

    async fn current_volume(&self) -> Result<Option<Volume>, PlayerCommandError> {
        match self {
            Self::Mpc(player) => player.current_volume().await,
            Self::Mopidy(player) => player.current_volume().await,
        }
    }

    async fn set_volume(&self, volume: Volume) -> Result<(), PlayerCommandError> {
        match self {
            Self::Mpc(player) => player.set_volume(volume).await,
            Self::Mopidy(player) => player.set_volume(volume).await,
        }
    }

    async fn set_repeat(&self, enabled: bool) -> Result<(), PlayerCommandError> {
        match self {
            Self::Mpc(player) => player.set_repeat(enabled).await,
            Self::Mopidy(player) => player.set_repeat(enabled).await,
        }
    }

    async fn set_random(&self, enabled: bool) -> Result<(), PlayerCommandError> {
        match self {
            Self::Mpc(player) => player.set_random(enabled).await,
            Self::Mopidy(player) => player.set_random(enabled).await,
        }
    }

    async fn next(&self) -> Result<(), PlayerCommandError> {
        match self {
            Self::Mpc(player) => player.next().await,
            Self::Mopidy(player) => player.next().await,
        }
    }

    async fn play(&self) -> Result<(), PlayerCommandError> {
        match self {
            Self::Mpc(player) => player.play().await,
            Self::Mopidy(player) => player.play().await,
        }
    }

    async fn pause(&self) -> Result<(), PlayerCommandError> {
        match self {
            Self::Mpc(player) => player.pause().await,
            Self::Mopidy(player) => player.pause().await,
        }
    }

    async fn stop(&self) -> Result<(), PlayerCommandError> {
        match self {
            Self::Mpc(player) => player.stop().await,
            Self::Mopidy(player) => player.stop().await,
        }
    }
}
