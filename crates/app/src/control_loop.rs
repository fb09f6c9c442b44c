//! Control loop — periodic ticks raced against a shutdown signal.
//!
//! Ticks run one after another inside the loop task; a tick that falls due
//! while the previous one is still running is skipped, not queued. The
//! shutdown signal is polled first on every iteration and also while a tick
//! is in flight, so an interrupt never waits for a slow sensor or player.
//! A tick dropped mid-way has not committed anything: state is only updated
//! after its whole command sequence succeeded.

use std::future::Future;
use std::time::Duration;

use chrono::TimeZone;
use tokio::time::MissedTickBehavior;

use luxplay_domain::error::ErrorChain;

use crate::controller::PlaybackController;
use crate::ports::{Clock, PlayerSink, SensorSource};

/// Timing of the control loop.
#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    pub tick_interval: Duration,
    /// Upper bound for the final pause/stop on shutdown.
    pub shutdown_timeout: Duration,
}

/// Tick until `shutdown` resolves, then silence the player once.
///
/// The controller is expected to be initialised already; the first timer
/// tick fires one interval after entry.
pub async fn run<S, P, C, Tz>(
    controller: &PlaybackController<S, P, C, Tz>,
    settings: LoopSettings,
    shutdown: impl Future<Output = ()>,
) where
    S: SensorSource,
    P: PlayerSink,
    C: Clock,
    Tz: TimeZone,
{
    let mut ticker = tokio::time::interval_at(
        tokio::time::Instant::now() + settings.tick_interval,
        settings.tick_interval,
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    tracing::info!(
        interval_ms = settings.tick_interval.as_millis(),
        "control loop started"
    );

    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => break,
            _ = ticker.tick() => {
                tokio::select! {
                    biased;
                    () = &mut shutdown => {
                        tracing::debug!("tick preempted by shutdown");
                        break;
                    }
                    outcome = controller.tick() => {
                        tracing::trace!(?outcome, "tick finished");
                    }
                }
            }
        }
    }

    tracing::info!("shutdown requested");
    match controller.shutdown(settings.shutdown_timeout).await {
        Ok(true) => tracing::info!("control loop stopped"),
        Ok(false) => tracing::debug!("control loop stopped, player already silenced"),
        Err(err) => {
            tracing::warn!(
                error = %ErrorChain(&err),
                "final player command failed, exiting anyway"
            );
        }
    }
}
