//! Sensor port — one-shot reads of the ambient light or presence sensor.

use std::future::Future;

use luxplay_domain::error::SensorReadError;
use luxplay_domain::reading::SensorReading;

/// A sensor that can be sampled on demand.
///
/// Implementations must bound their own IO with a timeout; the controller
/// holds its exclusive section while a read is outstanding.
pub trait SensorSource: Send + Sync {
    /// Take a fresh reading.
    ///
    /// Malformed payloads are errors, never a zero value.
    fn read(&self) -> impl Future<Output = Result<SensorReading, SensorReadError>> + Send;
}
