//! JSON-RPC 2.0 envelopes as spoken by Mopidy's HTTP frontend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MopidyError;

pub const GET_STATE: &str = "core.playback.get_state";
pub const PLAY: &str = "core.playback.play";
pub const PAUSE: &str = "core.playback.pause";
pub const STOP: &str = "core.playback.stop";
pub const NEXT: &str = "core.playback.next";
pub const GET_VOLUME: &str = "core.mixer.get_volume";
pub const SET_VOLUME: &str = "core.mixer.set_volume";
pub const SET_REPEAT: &str = "core.tracklist.set_repeat";
pub const SET_RANDOM: &str = "core.tracklist.set_random";

#[derive(Debug, Serialize)]
pub struct Request<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

impl<'a> Request<'a> {
    #[must_use]
    pub fn new(id: u64, method: &'a str, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<ErrorObject>,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    code: i64,
    message: String,
}

/// Decode a response body into its `result`, or the RPC error it carries.
///
/// # Errors
///
/// Returns [`MopidyError::Decode`] for a body that is not a JSON-RPC
/// response and [`MopidyError::Rpc`] when it carries an error object.
pub fn decode_result(method: &'static str, body: &[u8]) -> Result<Value, MopidyError> {
    let response: Response = serde_json::from_slice(body).map_err(MopidyError::Decode)?;
    match response.error {
        Some(error) => Err(MopidyError::Rpc {
            method,
            code: error.code,
            message: error.message,
        }),
        None => Ok(response.result),
    }
}
