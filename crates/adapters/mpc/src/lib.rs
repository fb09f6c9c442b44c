//! # luxplay-adapter-mpc
//!
//! mpc adapter — controls an MPD server through the `mpc` command-line client.
//!
//! ## Responsibilities
//! - Invoke `mpc -h <host> [-p <port>] <args>` for every player command
//! - Kill invocations that exceed the configured timeout
//! - Parse `mpc status` for playback state and volume
//!
//! ## Dependency rule
//! Depends on `luxplay-app` (for the [`PlayerSink`] port) and
//! `luxplay-domain`.

pub mod config;
pub mod error;
pub mod status;

use std::process::Stdio;

use luxplay_app::ports::PlayerSink;
use luxplay_domain::command::PlayerCommand;
use luxplay_domain::error::PlayerCommandError;
use luxplay_domain::playback::PlaybackState;
use luxplay_domain::volume::Volume;
use tokio::process::Command;

pub use config::MpcConfig;
pub use error::MpcError;

/// Player backed by the `mpc` client.
pub struct MpcPlayer {
    config: MpcConfig,
}

impl MpcPlayer {
    #[must_use]
    pub fn new(config: MpcConfig) -> Self {
        Self { config }
    }

    /// Full argument list for one invocation, connection flags first.
    fn command_args(&self, args: &[&str]) -> Vec<String> {
        let mut full = vec!["-h".to_string(), self.config.host.clone()];
        if let Some(port) = self.config.port {
            full.push("-p".to_string());
            full.push(port.to_string());
        }
        full.extend(args.iter().map(|arg| (*arg).to_string()));
        full
    }

    /// Run mpc once and return its stdout.
    async fn invoke(&self, args: &[&str]) -> Result<String, MpcError> {
        let args = self.command_args(args);
        tracing::debug!(binary = %self.config.binary, ?args, "invoking mpc");

        let child = Command::new(&self.config.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let timeout = self.config.timeout();
        let output = tokio::time::timeout(timeout, child)
            .await
            .map_err(|_| MpcError::TimedOut(timeout))?
            .map_err(MpcError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(match output.status.code() {
                Some(code) => MpcError::Exit { code, stderr },
                None => MpcError::Terminated,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn run(&self, command: PlayerCommand, args: &[&str]) -> Result<String, PlayerCommandError> {
        self.invoke(args)
            .await
            .map_err(|err| err.into_domain(command))
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

impl PlayerSink for MpcPlayer {
    async fn prepare_media(&self) -> Result<(), PlayerCommandError> {
        self.run(PlayerCommand::PrepareMedia, &["clear"]).await?;
        if let Some(playlist) = &self.config.playlist {
            self.run(PlayerCommand::PrepareMedia, &["load", playlist.as_str()])
                .await?;
            tracing::info!(%playlist, "playlist loaded");
        }
        Ok(())
    }

    async fn current_state(&self) -> Result<PlaybackState, PlayerCommandError> {
        let output = self.run(PlayerCommand::CurrentState, &["status"]).await?;
        Ok(status::parse_state(&output))
    }

    async fn current_volume(&self) -> Result<Option<Volume>, PlayerCommandError> {
        let output = self.run(PlayerCommand::CurrentVolume, &["status"]).await?;
        Ok(status::parse_volume(&output))
    }

    async fn set_volume(&self, volume: Volume) -> Result<(), PlayerCommandError> {
        let level = volume.to_string();
        self.run(PlayerCommand::SetVolume(volume), &["volume", level.as_str()])
            .await
            .map(drop)
    }

    async fn set_repeat(&self, enabled: bool) -> Result<(), PlayerCommandError> {
        self.run(PlayerCommand::SetRepeat(enabled), &["repeat", on_off(enabled)])
            .await
            .map(drop)
    }

    async fn set_random(&self, enabled: bool) -> Result<(), PlayerCommandError> {
        self.run(PlayerCommand::SetRandom(enabled), &["random", on_off(enabled)])
            .await
            .map(drop)
    }

    async fn next(&self) -> Result<(), PlayerCommandError> {
        self.run(PlayerCommand::Next, &["next"]).await.map(drop)
    }

    async fn play(&self) -> Result<(), PlayerCommandError> {
        self.run(PlayerCommand::Play, &["play"]).await.map(drop)
    }

    async fn pause(&self) -> Result<(), PlayerCommandError> {
        self.run(PlayerCommand::Pause, &["pause"]).await.map(drop)
    }

    async fn stop(&self) -> Result<(), PlayerCommandError> {
        self.run(PlayerCommand::Stop, &["stop"]).await.map(drop)
    }
}
