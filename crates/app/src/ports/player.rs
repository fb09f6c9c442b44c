//! Player port — the command surface of the music player backend.
//!
//! The controller only ever talks to this trait; which backend sits behind
//! it (`mpc` process invocation, Mopidy JSON-RPC, …) is chosen at startup.

use std::future::Future;

use luxplay_domain::error::PlayerCommandError;
use luxplay_domain::playback::PlaybackState;
use luxplay_domain::volume::Volume;

/// Capability interface of a music player.
///
/// Every method must be bounded by a timeout in the implementation. Errors
/// carry the command that failed and the underlying transport cause.
pub trait PlayerSink: Send + Sync {
    /// Clear the queue and load media, for backends that need it.
    ///
    /// The default implementation is a no-op.
    fn prepare_media(&self) -> impl Future<Output = Result<(), PlayerCommandError>> + Send {
        async { Ok(()) }
    }

    /// Ask the backend what it is doing.
    fn current_state(&self) -> impl Future<Output = Result<PlaybackState, PlayerCommandError>> + Send;

    /// Ask the backend for its mixer volume, if it can report one.
    ///
    /// Only used for diagnostics; the default reports nothing.
    fn current_volume(
        &self,
    ) -> impl Future<Output = Result<Option<Volume>, PlayerCommandError>> + Send {
        async { Ok(None) }
    }

    fn set_volume(&self, volume: Volume) -> impl Future<Output = Result<(), PlayerCommandError>> + Send;

    fn set_repeat(&self, enabled: bool) -> impl Future<Output = Result<(), PlayerCommandError>> + Send;

    fn set_random(&self, enabled: bool) -> impl Future<Output = Result<(), PlayerCommandError>> + Send;

    /// Skip to the next track, so playback does not always resume the same one.
    fn next(&self) -> impl Future<Output = Result<(), PlayerCommandError>> + Send;

    fn play(&self) -> impl Future<Output = Result<(), PlayerCommandError>> + Send;

    fn pause(&self) -> impl Future<Output = Result<(), PlayerCommandError>> + Send;

    fn stop(&self) -> impl Future<Output = Result<(), PlayerCommandError>> + Send;
}
