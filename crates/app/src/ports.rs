//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the control loop and the outside world.
//! They are defined here (in `app`) so that both the controller and the
//! adapter crates can depend on them without creating circular dependencies.

pub mod clock;
pub mod player;
pub mod sensor;

pub use clock::{Clock, SystemClock};
pub use player::PlayerSink;
pub use sensor::SensorSource;
