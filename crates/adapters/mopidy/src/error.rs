//! Mopidy adapter error types.

use luxplay_domain::command::PlayerCommand;
use luxplay_domain::error::PlayerCommandError;

/// Errors specific to the Mopidy adapter.
#[derive(Debug, thiserror::Error)]
pub enum MopidyError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request failed or timed out before a response arrived.
    #[error("mopidy request failed")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-success HTTP status.
    #[error("mopidy answered with HTTP status {0}")]
    Status(u16),

    /// The server answered with a JSON-RPC error object.
    #[error("mopidy rejected `{method}` ({code}): {message}")]
    Rpc {
        method: &'static str,
        code: i64,
        message: String,
    },

    /// The response body is not a JSON-RPC response.
    #[error("failed to decode mopidy response")]
    Decode(#[source] serde_json::Error),

    /// The call succeeded but its result has an unexpected shape.
    #[error("unexpected result for `{method}`: {result}")]
    UnexpectedResult {
        method: &'static str,
        result: serde_json::Value,
    },
}

impl MopidyError {
    /// Attach the command that failed, for propagation across the port boundary.
    pub fn into_domain(self, command: PlayerCommand) -> PlayerCommandError {
        PlayerCommandError::new(command, self)
    }
}
