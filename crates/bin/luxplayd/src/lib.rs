//! # luxplayd — luxplay daemon
//!
//! Composition root that wires the adapters together and runs the control
//! loop.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the tracing subscriber
//! - Construct the Hue sensor and the selected player backend
//! - Initialise the player, then tick until SIGINT/SIGTERM
//! - Silence the player once on the way out
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod config;
pub mod logging;
pub mod player;
pub mod signal;

use std::future::Future;

use chrono_tz::Tz;
use luxplay_adapter_hue::{HueError, HueSensor};
use luxplay_adapter_mopidy::MopidyError;
use luxplay_app::control_loop;
use luxplay_app::controller::PlaybackController;
use luxplay_app::ports::SystemClock;
use luxplay_domain::error::{ErrorChain, PlayerCommandError};

use crate::config::Settings;
use crate::player::Player;

/// The fully wired controller.
pub type Controller = PlaybackController<HueSensor, Player, SystemClock, Tz>;

/// Failures that keep the daemon from entering the control loop.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to create sensor client")]
    Sensor(#[from] HueError),

    #[error("failed to create player client")]
    Player(#[from] MopidyError),

    #[error("failed to initialise the player")]
    Initialize(#[from] PlayerCommandError),
}

/// Build the controller from validated settings.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built.
pub fn build(settings: &Settings) -> Result<Controller, StartupError> {
    let sensor = HueSensor::new(&settings.sensor)?;
    let player = Player::from_settings(&settings.player)?;
    tracing::info!(
        sensor = sensor.url(),
        backend = player.backend_name(),
        "adapters ready"
    );
    Ok(PlaybackController::new(
        sensor,
        player,
        SystemClock,
        settings.time_zone,
        settings.controller.clone(),
    ))
}

/// Initialise the player and run the control loop until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the adapters cannot be built or a player command
/// fails during initialisation. Once the loop runs, nothing is fatal.
pub async fn serve(
    settings: &Settings,
    shutdown: impl Future<Output = ()>,
) -> Result<(), StartupError> {
    let controller = build(settings)?;

    let outcome = match controller.initialize().await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %ErrorChain(&err), "player initialisation failed");
            return Err(err.into());
        }
    };
    tracing::info!(?outcome, "player initialised");

    control_loop::run(&controller, settings.control_loop, shutdown).await;
    Ok(())
}
