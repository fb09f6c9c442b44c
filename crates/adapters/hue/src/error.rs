//! Hue adapter error types.

use luxplay_domain::error::{DecisionInputError, SensorReadError};

/// Errors specific to the Hue adapter.
#[derive(Debug, thiserror::Error)]
pub enum HueError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request failed or timed out before a response arrived.
    #[error("bridge request failed")]
    Request(#[source] reqwest::Error),

    /// The bridge answered with a non-success HTTP status.
    #[error("bridge answered with HTTP status {0}")]
    Status(u16),

    /// The bridge answered with its own error document.
    #[error("bridge error {code}: {description}")]
    Bridge { code: i64, description: String },

    /// The sensor document could not be turned into a reading.
    #[error("failed to decode sensor document")]
    Payload(#[source] DecisionInputError),
}

impl HueError {
    /// Convert into a [`SensorReadError`] for propagation across the port
    /// boundary.
    pub fn into_domain(self) -> SensorReadError {
        match self {
            Self::Payload(err) => SensorReadError::Malformed(err),
            Self::Bridge { code, description } => {
                SensorReadError::Bridge(format!("bridge error {code}: {description}"))
            }
            other => SensorReadError::Transport(Box::new(other)),
        }
    }
}

impl From<HueError> for SensorReadError {
    fn from(err: HueError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxplay_domain::error::ErrorChain;

    #[test]
    fn should_display_status_error() {
        assert_eq!(
            HueError::Status(503).to_string(),
            "bridge answered with HTTP status 503"
        );
    }

    #[test]
    fn should_convert_status_to_transport_error() {
        let err: SensorReadError = HueError::Status(500).into();
        assert!(matches!(err, SensorReadError::Transport(_)));
    }

    #[test]
    fn should_keep_status_in_rendered_chain() {
        let err: SensorReadError = HueError::Status(503).into();
        assert_eq!(
            ErrorChain(&err).to_string(),
            "sensor request failed: bridge answered with HTTP status 503"
        );
    }

    #[test]
    fn should_convert_bridge_error_with_description() {
        let err: SensorReadError = HueError::Bridge {
            code: 1,
            description: "unauthorized user".to_string(),
        }
        .into();
        match err {
            SensorReadError::Bridge(message) => {
                assert_eq!(message, "bridge error 1: unauthorized user");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn should_convert_payload_error_to_malformed() {
        let err: SensorReadError =
            HueError::Payload(DecisionInputError::MissingField("state.lightlevel")).into();
        assert!(matches!(
            err,
            SensorReadError::Malformed(DecisionInputError::MissingField("state.lightlevel"))
        ));
    }
}
