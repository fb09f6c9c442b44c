//! # luxplay-adapter-mopidy
//!
//! Mopidy adapter — controls a Mopidy server through its HTTP JSON-RPC API.
//!
//! ## Responsibilities
//! - POST JSON-RPC 2.0 calls to `{url}/mopidy/rpc` with a bounded timeout
//! - Map playback, mixer, and tracklist commands to `core.*` methods
//! - Surface JSON-RPC error objects as command failures
//!
//! Mopidy keeps its own tracklist, so media preparation is left to the
//! server and [`PlayerSink::prepare_media`] keeps its no-op default.
//!
//! ## Dependency rule
//! Depends on `luxplay-app` (for the [`PlayerSink`] port) and
//! `luxplay-domain`.

pub mod config;
pub mod error;
pub mod rpc;

use std::sync::atomic::{AtomicU64, Ordering};

use luxplay_app::ports::PlayerSink;
use luxplay_domain::command::PlayerCommand;
use luxplay_domain::error::PlayerCommandError;
use luxplay_domain::playback::PlaybackState;
use luxplay_domain::volume::Volume;
use serde_json::{Value, json};

pub use config::MopidyConfig;
pub use error::MopidyError;

/// Player backed by a Mopidy server.
pub struct MopidyPlayer {
    client: reqwest::Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl MopidyPlayer {
    /// Build a JSON-RPC client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MopidyError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &MopidyConfig) -> Result<Self, MopidyError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .build()
            .map_err(MopidyError::Client)?;
        Ok(Self {
            client,
            endpoint: config.rpc_endpoint(),
            next_id: AtomicU64::new(1),
        })
    }

    /// The JSON-RPC endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, method: &'static str, params: Option<Value>) -> Result<Value, MopidyError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(method, id, "mopidy call");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&rpc::Request::new(id, method, params))
            .send()
            .await
            .map_err(MopidyError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MopidyError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(MopidyError::Request)?;
        rpc::decode_result(method, &body)
    }

    async fn command(
        &self,
        command: PlayerCommand,
        method: &'static str,
        params: Option<Value>,
    ) -> Result<Value, PlayerCommandError> {
        self.call(method, params)
            .await
            .map_err(|err| err.into_domain(command))
    }
}

fn parse_state(result: Value) -> Result<PlaybackState, MopidyError> {
    result
        .as_str()
        .and_then(|state| state.parse().ok())
        .ok_or(MopidyError::UnexpectedResult {
            method: rpc::GET_STATE,
            result,
        })
}

fn parse_volume(result: Value) -> Result<Option<Volume>, MopidyError> {
    if result.is_null() {
        return Ok(None);
    }
    result
        .as_i64()
        .and_then(|level| Volume::try_from(level).ok())
        .map(Some)
        .ok_or(MopidyError::UnexpectedResult {
            method: rpc::GET_VOLUME,
            result,
        })
}

impl PlayerSink for MopidyPlayer {
    async fn current_state(&self) -> Result<PlaybackState, PlayerCommandError> {
        let result = self
            .command(PlayerCommand::CurrentState, rpc::GET_STATE, None)
            .await?;
        parse_state(result).map_err(|err| err.into_domain(PlayerCommand::CurrentState))
    }

    async fn current_volume(&self) -> Result<Option<Volume>, PlayerCommandError> {
        let result = self
            .command(PlayerCommand::CurrentVolume, rpc::GET_VOLUME, None)
            .await?;
        parse_volume(result).map_err(|err| err.into_domain(PlayerCommand::CurrentVolume))
    }

    async fn set_volume(&self, volume: Volume) -> Result<(), PlayerCommandError> {
        let command = PlayerCommand::SetVolume(volume);
        let result = self
            .command(
                command.clone(),
                rpc::SET_VOLUME,
                Some(json!({ "volume": volume.get() })),
            )
            .await?;
        // The mixer answers `false` when it refused the change.
        if result == Value::Bool(false) {
            return Err(MopidyError::UnexpectedResult {
                method: rpc::SET_VOLUME,
                result,
            }
            .into_domain(command));
        }
        Ok(())
    }

    async fn set_repeat(&self, enabled: bool) -> Result<(), PlayerCommandError> {
        self.command(
            PlayerCommand::SetRepeat(enabled),
            rpc::SET_REPEAT,
            Some(json!([enabled])),
        )
        .await?;
        Ok(())
    }

    async fn set_random(&self, enabled: bool) -> Result<(), PlayerCommandError> {
        self.command(
            PlayerCommand::SetRandom(enabled),
            rpc::SET_RANDOM,
            Some(json!([enabled])),
        )
        .await?;
        Ok(())
    }

    async fn next(&self) -> Result<(), PlayerCommandError> {
        self.command(PlayerCommand::Next, rpc::NEXT, None).await?;
        Ok(())
    }

    async fn play(&self) -> Result<(), PlayerCommandError> {
        self.command(PlayerCommand::Play, rpc::PLAY, None).await?;
        Ok(())
    }

    async fn pause(&self) -> Result<(), PlayerCommandError> {
        self.command(PlayerCommand::Pause, rpc::PAUSE, None).await?;
        Ok(())
    }

    async fn stop(&self) -> Result<(), PlayerCommandError> {
        self.command(PlayerCommand::Stop, rpc::STOP, None).await?;
        Ok(())
    }
}
