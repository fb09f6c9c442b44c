//! Error taxonomy shared across the workspace.
//!
//! Each adapter defines its own typed errors and converts into these via
//! `From`. Only configuration errors are fatal; everything here except
//! [`ValidationError`] is recoverable at the tick boundary.

use std::fmt;
use std::time::Duration;

use crate::command::PlayerCommand;
use crate::window::TimeOfDay;

/// Boxed transport-level cause carried by recoverable errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Displays an error followed by its `source()` chain, `outer: inner: root`.
///
/// Use it when logging at the tick boundary, e.g. `error = %ErrorChain(&err)`.
pub struct ErrorChain<'a>(pub &'a (dyn std::error::Error + 'static));

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(err) = source {
            write!(f, ": {err}")?;
            source = err.source();
        }
        Ok(())
    }
}

/// A domain value failed its invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("volume {0} is outside 0..=100")]
    VolumeOutOfRange(i64),

    #[error("invalid time of day {0:?}, expected HH:MM")]
    InvalidTimeOfDay(String),

    #[error("day window start {start} is after end {end}")]
    InvertedWindow { start: TimeOfDay, end: TimeOfDay },

    #[error("unknown playback state {0:?}")]
    UnknownPlaybackState(String),
}

/// A sensor payload could not be turned into a [`SensorReading`](crate::reading::SensorReading).
#[derive(Debug, thiserror::Error)]
pub enum DecisionInputError {
    /// The payload is not the JSON document we expect.
    #[error("sensor payload is not valid JSON")]
    InvalidPayload(#[source] BoxError),

    /// The payload parsed but the reading field is absent or has the wrong type.
    #[error("sensor payload has no usable `{0}` field")]
    MissingField(&'static str),

    /// The reading field is a number the decision engine cannot use.
    #[error("sensor field `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

/// Reading the sensor failed. The tick is skipped.
#[derive(Debug, thiserror::Error)]
pub enum SensorReadError {
    /// The request failed, timed out, or returned a non-success status.
    #[error("sensor request failed")]
    Transport(#[source] BoxError),

    /// The bridge answered with its own error document.
    #[error("sensor bridge reported an error: {0}")]
    Bridge(String),

    /// The bridge answered but the reading could not be decoded.
    #[error("sensor returned a malformed reading")]
    Malformed(#[from] DecisionInputError),
}

/// A player command failed. The transition is retried next tick.
#[derive(Debug, thiserror::Error)]
#[error("player command `{command}` failed")]
pub struct PlayerCommandError {
    command: PlayerCommand,
    #[source]
    source: BoxError,
}

impl PlayerCommandError {
    /// Wrap a backend failure for the given command.
    pub fn new(command: PlayerCommand, source: impl Into<BoxError>) -> Self {
        Self {
            command,
            source: source.into(),
        }
    }

    /// The command that failed.
    #[must_use]
    pub fn command(&self) -> &PlayerCommand {
        &self.command
    }
}

/// The final pause/stop on shutdown did not go through. Logged, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    #[error("final player command did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("final player command failed")]
    Player(#[from] PlayerCommandError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_volume_out_of_range() {
        let err = ValidationError::VolumeOutOfRange(120);
        assert_eq!(err.to_string(), "volume 120 is outside 0..=100");
    }

    #[test]
    fn should_display_inverted_window() {
        let err = ValidationError::InvertedWindow {
            start: TimeOfDay::new(22, 0).unwrap(),
            end: TimeOfDay::new(6, 0).unwrap(),
        };
        assert_eq!(err.to_string(), "day window start 22:00 is after end 06:00");
    }

    #[test]
    fn should_name_the_failed_command() {
        let err = PlayerCommandError::new(PlayerCommand::Play, "exit status 1");
        assert_eq!(err.to_string(), "player command `play` failed");
        assert_eq!(err.command(), &PlayerCommand::Play);
    }

    #[test]
    fn should_keep_transport_cause_as_source() {
        let err = PlayerCommandError::new(PlayerCommand::Next, "connection refused");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection refused");
    }

    #[test]
    fn should_render_full_error_chain() {
        let err = PlayerCommandError::new(
            PlayerCommand::Play,
            "exit status 1: mpd error: Connection refused",
        );
        assert_eq!(
            ErrorChain(&err).to_string(),
            "player command `play` failed: exit status 1: mpd error: Connection refused"
        );

        let err: ShutdownError = PlayerCommandError::new(PlayerCommand::Pause, "boom").into();
        assert_eq!(
            ErrorChain(&err).to_string(),
            "final player command failed: player command `pause` failed: boom"
        );
    }

    #[test]
    fn should_render_error_without_source_as_is() {
        let err = SensorReadError::Bridge("bridge error 1: unauthorized user".to_string());
        assert_eq!(
            ErrorChain(&err).to_string(),
            "sensor bridge reported an error: bridge error 1: unauthorized user"
        );
    }

    #[test]
    fn should_display_out_of_range_field() {
        let err = DecisionInputError::OutOfRange {
            field: "state.lightlevel",
            value: "-4".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "sensor field `state.lightlevel` is out of range: -4"
        );
    }

    #[test]
    fn should_convert_decision_input_error_into_malformed_read() {
        let err: SensorReadError = DecisionInputError::MissingField("state.lightlevel").into();
        assert!(matches!(err, SensorReadError::Malformed(_)));
    }

    #[test]
    fn should_convert_player_error_into_shutdown_error() {
        let err: ShutdownError = PlayerCommandError::new(PlayerCommand::Pause, "boom").into();
        assert_eq!(err.to_string(), "final player command failed");
    }

    #[test]
    fn should_display_shutdown_timeout() {
        let err = ShutdownError::TimedOut(Duration::from_secs(5));
        assert_eq!(err.to_string(), "final player command did not finish within 5s");
    }
}
