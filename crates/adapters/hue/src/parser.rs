//! Sensor document decoding.
//!
//! A sensor resource looks like `{"state": {"lightlevel": 12000, ...}, ...}`.
//! When the request is rejected (unknown user, unknown sensor) the bridge
//! still answers `200 OK`, with `[{"error": {"type": 1, "description": ...}}]`.

use luxplay_domain::error::DecisionInputError;
use luxplay_domain::reading::{SensorKind, SensorReading};
use serde::Deserialize;
use serde_json::Value;

use crate::error::HueError;

#[derive(Debug, Deserialize)]
struct BridgeFailure {
    error: BridgeErrorBody,
}

#[derive(Debug, Deserialize)]
struct BridgeErrorBody {
    #[serde(rename = "type", default)]
    code: i64,
    #[serde(default)]
    description: String,
}

/// Decode a sensor document into a reading of the requested kind.
///
/// # Errors
///
/// Returns [`HueError::Bridge`] for a bridge error document and
/// [`HueError::Payload`] when the body is not JSON or lacks the field.
pub fn parse_reading(body: &[u8], kind: SensorKind) -> Result<SensorReading, HueError> {
    let document: Value = serde_json::from_slice(body)
        .map_err(|err| HueError::Payload(DecisionInputError::InvalidPayload(Box::new(err))))?;

    if let Value::Array(items) = &document
        && let Some(failure) = items
            .iter()
            .find_map(|item| BridgeFailure::deserialize(item).ok())
    {
        return Err(HueError::Bridge {
            code: failure.error.code,
            description: failure.error.description,
        });
    }

    let state = document.get("state");
    let missing = || HueError::Payload(DecisionInputError::MissingField(kind.field_path()));
    match kind {
        SensorKind::LightLevel => {
            let Some(Value::Number(level)) = state.and_then(|state| state.get("lightlevel")) else {
                return Err(missing());
            };
            level
                .as_u64()
                .and_then(|level| u32::try_from(level).ok())
                .map(SensorReading::LightLevel)
                .ok_or_else(|| {
                    HueError::Payload(DecisionInputError::OutOfRange {
                        field: kind.field_path(),
                        value: level.to_string(),
                    })
                })
        }
        SensorKind::Presence => state
            .and_then(|state| state.get("presence"))
            .and_then(Value::as_bool)
            .map(SensorReading::Presence)
            .ok_or_else(missing),
    }
}
