//! mpc adapter error types.

use std::time::Duration;

use luxplay_domain::command::PlayerCommand;
use luxplay_domain::error::PlayerCommandError;

/// Errors specific to the mpc adapter.
#[derive(Debug, thiserror::Error)]
pub enum MpcError {
    /// The mpc process could not be started.
    #[error("failed to spawn mpc")]
    Spawn(#[source] std::io::Error),

    /// The mpc process did not finish in time and was killed.
    #[error("mpc did not finish within {0:?}")]
    TimedOut(Duration),

    /// mpc ran but exited unsuccessfully.
    #[error("mpc exited with status {code}: {stderr}")]
    Exit { code: i32, stderr: String },

    /// mpc was killed by a signal.
    #[error("mpc was terminated by a signal")]
    Terminated,
}

impl MpcError {
    /// Attach the command that failed, for propagation across the port boundary.
    pub fn into_domain(self, command: PlayerCommand) -> PlayerCommandError {
        PlayerCommandError::new(command, self)
    }
}
