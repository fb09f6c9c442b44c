//! Hue bridge sensor configuration.

use std::time::Duration;

use luxplay_domain::reading::SensorKind;
use serde::Deserialize;

/// Configuration for the Hue sensor source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HueConfig {
    /// Bridge host (`192.168.1.2`), optionally with port or scheme.
    pub bridge_address: String,
    /// Whitelisted API username on the bridge.
    pub username: String,
    /// Bridge-local sensor identifier.
    pub sensor_id: String,
    /// Which field of the sensor to read.
    pub kind: SensorKind,
    /// Request timeout, in seconds.
    pub timeout_secs: u16,
}

impl HueConfig {
    /// URL of the sensor resource on the bridge.
    #[must_use]
    pub fn sensor_url(&self) -> String {
        let address = self.bridge_address.trim().trim_end_matches('/');
        let base = if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };
        format!("{base}/api/{}/sensors/{}", self.username, self.sensor_id)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_secs))
    }
}

impl Default for HueConfig {
    fn default() -> Self {
        Self {
            bridge_address: String::new(),
            username: String::new(),
            sensor_id: "5".to_string(),
            kind: SensorKind::LightLevel,
            timeout_secs: 5,
        }
    }
}
