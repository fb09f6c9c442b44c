//! # luxplay-app
//!
//! Application layer — the control loop and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SensorSource` — one-shot read of the light or presence sensor
//!   - `PlayerSink` — command surface of the music player
//!   - `Clock` — wall-clock time, swappable in tests
//! - Provide the `PlaybackController`: State Tracker plus the serialized
//!   evaluate-and-commit tick and the idempotent shutdown path
//! - Provide the periodic control loop racing ticks against a shutdown signal
//!
//! ## Dependency rule
//! Depends on `luxplay-domain` only (plus `tokio` for locking and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod control_loop;
pub mod controller;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;
