//! Playback controller — the evaluate-and-commit core of the control loop.
//!
//! A tick reads the sensor, asks the decision engine for the desired state,
//! derives the transition from the last committed state and, if needed,
//! drives the player. The player and the [`ControllerState`] live behind a
//! single mutex, shared by the tick path and the shutdown path, so at most
//! one command sequence is ever in flight and a shutdown never interleaves
//! with a half-applied transition.

use std::time::Duration;

use chrono::TimeZone;
use tokio::sync::Mutex;

use luxplay_domain::command::OffCommand;
use luxplay_domain::controller_state::ControllerState;
use luxplay_domain::decision::{DecisionRules, DesiredState, decide};
use luxplay_domain::error::{ErrorChain, PlayerCommandError, SensorReadError, ShutdownError};
use luxplay_domain::playback::PlaybackState;
use luxplay_domain::reading::SensorReading;
use luxplay_domain::time::{Timestamp, deadline_after};
use luxplay_domain::transition::Transition;
use luxplay_domain::volume::Volume;
use luxplay_domain::window::DayWindow;

use crate::ports::{Clock, PlayerSink, SensorSource};

/// Static behaviour of the controller, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub window: DayWindow,
    pub rules: DecisionRules,
    /// Volume applied at startup and before every resume.
    pub volume: Volume,
    pub off_command: OffCommand,
    /// Re-evaluation is suppressed for this long after turning on. Zero disables it.
    pub grace_period: Duration,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Shutdown already ran; nothing was evaluated.
    ShutDown,
    /// Still inside the grace period of the last turn-on.
    GracePeriod,
    /// The sensor could not be read; nothing changed.
    SensorFailed,
    /// The desired state matches what was last committed.
    Unchanged(DesiredState),
    Committed(Transition),
    /// A player command failed; the transition will be retried next tick.
    CommandFailed(Transition),
}

enum TickFailure {
    Sensor(SensorReadError),
    Player {
        transition: Transition,
        error: PlayerCommandError,
    },
}

struct Guarded<P> {
    player: P,
    state: ControllerState,
}

/// Sequences sensor reads, decisions and player commands.
pub struct PlaybackController<S, P, C, Tz> {
    sensor: S,
    clock: C,
    time_zone: Tz,
    settings: ControllerSettings,
    guarded: Mutex<Guarded<P>>,
}

impl<S, P, C, Tz> PlaybackController<S, P, C, Tz>
where
    S: SensorSource,
    P: PlayerSink,
    C: Clock,
    Tz: TimeZone,
{
    /// Create a controller. `time_zone` is the zone the day window is read in.
    pub fn new(sensor: S, player: P, clock: C, time_zone: Tz, settings: ControllerSettings) -> Self {
        Self {
            sensor,
            clock,
            time_zone,
            settings,
            guarded: Mutex::new(Guarded {
                player,
                state: ControllerState::default(),
            }),
        }
    }

    /// Configure the player and bring it in line with the current decision.
    ///
    /// Runs, in order: prepare media, repeat on, random on, set volume, then
    /// one synchronous evaluation. A sensor failure during that evaluation is
    /// only logged (the first loop tick will try again); a player failure is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns the first failing player command. The caller should treat
    /// this as fatal and not enter the control loop.
    pub async fn initialize(&self) -> Result<TickOutcome, PlayerCommandError> {
        let mut guarded = self.guarded.lock().await;
        let Guarded { player, state } = &mut *guarded;

        player.prepare_media().await?;
        player.set_repeat(true).await?;
        player.set_random(true).await?;
        player.set_volume(self.settings.volume).await?;
        tracing::info!(volume = %self.settings.volume, "player configured");

        let playback = match player.current_state().await {
            Ok(playback) => playback,
            Err(err) => {
                tracing::warn!(error = %ErrorChain(&err), "could not query playback state");
                PlaybackState::Unknown
            }
        };
        state.observe_playback(playback);
        match player.current_volume().await {
            Ok(Some(volume)) => tracing::info!(%playback, %volume, "player state"),
            Ok(None) => tracing::info!(%playback, "player state"),
            Err(err) => {
                tracing::warn!(%playback, error = %ErrorChain(&err), "could not query volume");
            }
        }

        match self.evaluate(&mut guarded).await {
            Ok(outcome) => Ok(outcome),
            Err(TickFailure::Sensor(err)) => {
                tracing::warn!(
                    error = %ErrorChain(&err),
                    "initial sensor read failed, deferring to first tick"
                );
                Ok(TickOutcome::SensorFailed)
            }
            Err(TickFailure::Player { error, .. }) => Err(error),
        }
    }

    /// Run one evaluate-and-commit cycle.
    ///
    /// Never fails: recoverable errors are logged and reported through the
    /// returned [`TickOutcome`].
    pub async fn tick(&self) -> TickOutcome {
        let mut guarded = self.guarded.lock().await;
        match self.evaluate(&mut guarded).await {
            Ok(outcome) => outcome,
            Err(TickFailure::Sensor(err)) => {
                tracing::warn!(error = %ErrorChain(&err), "sensor read failed, skipping tick");
                TickOutcome::SensorFailed
            }
            Err(TickFailure::Player { transition, error }) => {
                let failures = guarded.state.record_failure();
                tracing::warn!(
                    %transition,
                    error = %ErrorChain(&error),
                    failures,
                    "player command failed, retrying next tick"
                );
                TickOutcome::CommandFailed(transition)
            }
        }
    }

    /// Issue the final pause/stop, at most once.
    ///
    /// Waits for an in-flight tick to release the exclusive section, then
    /// marks the controller shut down so later ticks do nothing. The whole
    /// operation, including that wait, is bounded by `limit`.
    ///
    /// Returns `Ok(false)` when shutdown had already run.
    ///
    /// # Errors
    ///
    /// Returns [`ShutdownError::TimedOut`] when `limit` elapses and
    /// [`ShutdownError::Player`] when the command fails. Callers log these
    /// and exit anyway.
    pub async fn shutdown(&self, limit: Duration) -> Result<bool, ShutdownError> {
        tokio::time::timeout(limit, self.shutdown_once())
            .await
            .map_err(|_| ShutdownError::TimedOut(limit))?
    }

    /// Copy of the controller state.
    pub async fn state(&self) -> ControllerState {
        self.guarded.lock().await.state.clone()
    }

    async fn shutdown_once(&self) -> Result<bool, ShutdownError> {
        let mut guarded = self.guarded.lock().await;
        if !guarded.state.begin_shutdown() {
            tracing::debug!("shutdown already completed");
            return Ok(false);
        }
        let off = self.settings.off_command;
        silence(&guarded.player, off).await?;
        guarded.state.observe_playback(off.resulting_state());
        tracing::info!(command = %off.command(), "player silenced for shutdown");
        Ok(true)
    }

    async fn evaluate(&self, guarded: &mut Guarded<P>) -> Result<TickOutcome, TickFailure> {
        if guarded.state.is_shut_down() {
            return Ok(TickOutcome::ShutDown);
        }
        if guarded.state.in_grace_period(self.clock.now()) {
            tracing::debug!("grace period active, skipping evaluation");
            return Ok(TickOutcome::GracePeriod);
        }

        let reading = self.sensor.read().await.map_err(TickFailure::Sensor)?;
        let desired = self.desired_state(reading, self.clock.now());
        let transition = guarded.state.transition_to(desired);
        tracing::debug!(kind = ?reading.kind(), %reading, %desired, %transition, "evaluated");

        let playback = match transition {
            Transition::None => return Ok(TickOutcome::Unchanged(desired)),
            Transition::TurnOn => self.turn_on(&guarded.player).await,
            Transition::TurnOff => self.turn_off(&guarded.player).await,
        }
        .map_err(|error| TickFailure::Player { transition, error })?;

        let committed_at = self.clock.now();
        let grace_until = match transition {
            Transition::TurnOn => deadline_after(committed_at, self.settings.grace_period),
            Transition::None | Transition::TurnOff => None,
        };
        guarded.state.commit(desired, playback, committed_at, grace_until);
        tracing::info!(%transition, %reading, %playback, "transition committed");
        Ok(TickOutcome::Committed(transition))
    }

    fn desired_state(&self, reading: SensorReading, now: Timestamp) -> DesiredState {
        let local = now.with_timezone(&self.time_zone);
        decide(reading, &local, &self.settings.window, &self.settings.rules)
    }

    async fn turn_on(&self, player: &P) -> Result<PlaybackState, PlayerCommandError> {
        player.set_volume(self.settings.volume).await?;
        player.next().await?;
        player.play().await?;
        Ok(PlaybackState::Playing)
    }

    async fn turn_off(&self, player: &P) -> Result<PlaybackState, PlayerCommandError> {
        let off = self.settings.off_command;
        silence(player, off).await?;
        Ok(off.resulting_state())
    }
}

async fn silence<P: PlayerSink>(player: &P, off: OffCommand) -> Result<(), PlayerCommandError> {
    match off {
        OffCommand::Pause => player.pause().await,
        OffCommand::Stop => player.stop().await,
    }
}
