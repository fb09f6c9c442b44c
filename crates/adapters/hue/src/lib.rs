//! # luxplay-adapter-hue
//!
//! Hue bridge adapter — reads one sensor over the bridge's local REST API.
//!
//! ## Responsibilities
//! - Fetch `GET /api/{username}/sensors/{id}` with a bounded timeout
//! - Decode the `state.lightlevel` or `state.presence` field
//! - Map transport, status, and bridge error documents to [`SensorReadError`]
//!
//! Every call is a fresh read; nothing is cached between ticks.
//!
//! ## Dependency rule
//! Depends on `luxplay-app` (for the [`SensorSource`] port) and
//! `luxplay-domain`.

pub mod config;
pub mod error;
pub mod parser;

use luxplay_app::ports::SensorSource;
use luxplay_domain::error::SensorReadError;
use luxplay_domain::reading::{SensorKind, SensorReading};

pub use config::HueConfig;
pub use error::HueError;

/// Sensor source backed by a Hue bridge.
pub struct HueSensor {
    client: reqwest::Client,
    url: String,
    kind: SensorKind,
}

impl HueSensor {
    /// Build a sensor client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HueError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &HueConfig) -> Result<Self, HueError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .build()
            .map_err(HueError::Client)?;
        Ok(Self {
            client,
            url: config.sensor_url(),
            kind: config.kind,
        })
    }

    /// The sensor resource URL this client polls.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<SensorReading, HueError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(HueError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(HueError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(HueError::Request)?;
        parser::parse_reading(&body, self.kind)
    }
}

impl SensorSource for HueSensor {
    async fn read(&self) -> Result<SensorReading, SensorReadError> {
        let reading = self.fetch().await?;
        tracing::debug!(%reading, "sensor read");
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use luxplay_domain::error::DecisionInputError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SENSOR_PATH: &str = "/api/tester/sensors/5";

    fn config_for(server: &MockServer, kind: SensorKind) -> HueConfig {
        HueConfig {
            bridge_address: server.uri(),
            username: "tester".to_string(),
            kind,
            timeout_secs: 1,
            ..HueConfig::default()
        }
    }

    #[tokio::test]
    async fn should_read_light_level_from_bridge() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SENSOR_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"state": {"lightlevel": 1500}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let sensor = HueSensor::new(&config_for(&server, SensorKind::LightLevel)).unwrap();
        let reading = sensor.read().await.unwrap();

        assert_eq!(reading, SensorReading::LightLevel(1500));
    }

    #[tokio::test]
    async fn should_read_presence_from_bridge() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SENSOR_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"state": {"presence": false}})),
            )
            .mount(&server)
            .await;

        let sensor = HueSensor::new(&config_for(&server, SensorKind::Presence)).unwrap();

        assert_eq!(sensor.read().await.unwrap(), SensorReading::Presence(false));
    }

    #[tokio::test]
    async fn should_fetch_fresh_reading_every_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SENSOR_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"state": {"lightlevel": 10}})),
            )
            .expect(3)
            .mount(&server)
            .await;

        let sensor = HueSensor::new(&config_for(&server, SensorKind::LightLevel)).unwrap();
        for _ in 0..3 {
            sensor.read().await.unwrap();
        }
    }

    #[tokio::test]
    async fn should_map_server_error_to_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let sensor = HueSensor::new(&config_for(&server, SensorKind::LightLevel)).unwrap();

        assert!(matches!(
            sensor.read().await,
            Err(SensorReadError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn should_map_bridge_error_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"error": {"type": 1, "address": "/", "description": "unauthorized user"}}
            ])))
            .mount(&server)
            .await;

        let sensor = HueSensor::new(&config_for(&server, SensorKind::LightLevel)).unwrap();

        match sensor.read().await {
            Err(SensorReadError::Bridge(message)) => assert!(message.contains("unauthorized")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_map_missing_field_to_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"state": {}})),
            )
            .mount(&server)
            .await;

        let sensor = HueSensor::new(&config_for(&server, SensorKind::LightLevel)).unwrap();

        assert!(matches!(
            sensor.read().await,
            Err(SensorReadError::Malformed(DecisionInputError::MissingField(
                "state.lightlevel"
            )))
        ));
    }

    #[tokio::test]
    async fn should_time_out_slow_bridge() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"state": {"lightlevel": 10}}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let sensor = HueSensor::new(&config_for(&server, SensorKind::LightLevel)).unwrap();

        assert!(matches!(
            sensor.read().await,
            Err(SensorReadError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn should_fail_when_bridge_unreachable() {
        let config = HueConfig {
            bridge_address: "http://127.0.0.1:9".to_string(),
            username: "tester".to_string(),
            timeout_secs: 1,
            ..HueConfig::default()
        };
        let sensor = HueSensor::new(&config).unwrap();

        assert!(matches!(
            sensor.read().await,
            Err(SensorReadError::Transport(_))
        ));
    }
}
