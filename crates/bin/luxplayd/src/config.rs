//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `luxplay.toml` in the working directory, or the file named by
//! `LUXPLAY_CONFIG`. The default file is optional: every required setting can
//! come from the environment instead. Environment variables take precedence
//! over file values. [`Config::validate`] turns the raw values into typed
//! [`Settings`] and rejects anything the controller cannot run with.

use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;
use luxplay_adapter_hue::HueConfig;
use luxplay_adapter_mopidy::MopidyConfig;
use luxplay_adapter_mpc::MpcConfig;
use luxplay_app::control_loop::LoopSettings;
use luxplay_app::controller::ControllerSettings;
use luxplay_domain::command::OffCommand;
use luxplay_domain::decision::{DEFAULT_LIGHT_THRESHOLD, DecisionRules};
use luxplay_domain::volume::Volume;
use luxplay_domain::window::{DayWindow, TimeOfDay};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "luxplay.toml";

/// Log filter used when neither the file nor the environment sets one.
pub const DEFAULT_LOG_FILTER: &str = "luxplayd=info,luxplay=info";

/// Top-level configuration, as written in the file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IANA time zone the day window is read in.
    pub time_zone: String,
    /// Daily window during which light readings may start playback.
    pub window: WindowConfig,
    /// Hue bridge sensor settings.
    pub sensor: SensorConfig,
    /// Player backend settings.
    pub player: PlayerConfig,
    /// Control loop timing.
    pub controller: ControllerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Day window bounds, `HH:MM`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Sensor configuration: the bridge connection plus decision tuning.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    #[serde(flatten)]
    pub bridge: HueConfig,
    /// Light level above which the room counts as lit.
    pub threshold: u32,
    /// Whether presence readings are also restricted to the day window.
    pub presence_uses_window: bool,
}

/// Which player backend drives playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    #[default]
    Mpc,
    Mopidy,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mpc" => Ok(Self::Mpc),
            "mopidy" => Ok(Self::Mopidy),
            other => Err(format!("unknown backend {other:?}, expected mpc or mopidy")),
        }
    }
}

/// Player configuration shared by both backends, plus per-backend sections.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub backend: Backend,
    /// Volume applied at startup and on every resume, `0..=100`.
    pub volume: i64,
    /// Command used to silence the player.
    pub off_command: OffCommand,
    pub mpc: MpcConfig,
    pub mopidy: MopidyConfig,
}

/// Control loop timing.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Delay between two sensor polls, in milliseconds.
    pub tick_interval_ms: u64,
    /// Re-evaluation pause after turning on, in seconds. Zero disables it.
    pub grace_period_secs: u64,
    /// Upper bound for the final pause/stop on shutdown, in seconds.
    pub shutdown_timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Selected player backend with its connection settings.
#[derive(Debug, Clone)]
pub enum PlayerSettings {
    Mpc(MpcConfig),
    Mopidy(MopidyConfig),
}

/// Validated runtime settings.
#[derive(Debug)]
pub struct Settings {
    pub time_zone: Tz,
    pub controller: ControllerSettings,
    pub control_loop: LoopSettings,
    pub sensor: HueConfig,
    pub player: PlayerSettings,
    pub log_filter: String,
}

impl Config {
    /// Load configuration from the file (if present), apply environment
    /// overrides, and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or malformed, or if a
    /// required setting is missing or invalid.
    pub fn load() -> Result<Settings, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`], reading the environment through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Settings, ConfigError> {
        let mut config = match lookup("LUXPLAY_CONFIG") {
            Some(path) => Self::from_required_file(&path)?,
            None => Self::from_file(DEFAULT_CONFIG_PATH)?,
        };
        config.apply_env_overrides(&lookup)?;
        config.validate()
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn from_required_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("LUXPLAY_TIME_ZONE") {
            self.time_zone = val;
        }
        if let Some(val) = lookup("LUXPLAY_DAY_START") {
            self.window.start = Some(val);
        }
        if let Some(val) = lookup("LUXPLAY_DAY_END") {
            self.window.end = Some(val);
        }
        if let Some(val) = lookup("LUXPLAY_HUE_BRIDGE") {
            self.sensor.bridge.bridge_address = val;
        }
        if let Some(val) = lookup("LUXPLAY_HUE_USERNAME") {
            self.sensor.bridge.username = val;
        }
        if let Some(val) = lookup("LUXPLAY_HUE_SENSOR_ID") {
            self.sensor.bridge.sensor_id = val;
        }
        if let Some(val) = lookup("LUXPLAY_BACKEND") {
            self.player.backend = val.parse().map_err(|reason| ConfigError::Invalid {
                setting: "player.backend",
                reason,
            })?;
        }
        if let Some(val) = lookup("LUXPLAY_VOLUME") {
            self.player.volume = val.trim().parse().map_err(|_| ConfigError::Invalid {
                setting: "player.volume",
                reason: format!("{val:?} is not a number"),
            })?;
        }
        if let Some(val) = lookup("LUXPLAY_MPD_HOST") {
            self.player.mpc.host = val;
        }
        if let Some(val) = lookup("LUXPLAY_PLAYLIST") {
            self.player.mpc.playlist = Some(val).filter(|name| !name.is_empty());
        }
        if let Some(val) = lookup("LUXPLAY_MOPIDY_URL") {
            self.player.mopidy.url = val;
        }
        if let Some(val) = lookup("LUXPLAY_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    /// Check required settings and convert into typed [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an absent required setting and
    /// [`ConfigError::Invalid`] for a value that fails its invariants.
    pub fn validate(self) -> Result<Settings, ConfigError> {
        let start = parse_time("window.start", self.window.start.as_deref())?;
        let end = parse_time("window.end", self.window.end.as_deref())?;
        let window = DayWindow::new(start, end).map_err(|err| ConfigError::Invalid {
            setting: "window",
            reason: err.to_string(),
        })?;

        let time_zone: Tz = self.time_zone.parse().map_err(|_| ConfigError::Invalid {
            setting: "time_zone",
            reason: format!("unknown time zone {:?}", self.time_zone),
        })?;

        if self.sensor.bridge.bridge_address.trim().is_empty() {
            return Err(ConfigError::Missing("sensor.bridge_address"));
        }
        if self.sensor.bridge.username.trim().is_empty() {
            return Err(ConfigError::Missing("sensor.username"));
        }

        let player = match self.player.backend {
            Backend::Mpc if self.player.mpc.host.trim().is_empty() => {
                return Err(ConfigError::Missing("player.mpc.host"));
            }
            Backend::Mopidy if self.player.mopidy.url.trim().is_empty() => {
                return Err(ConfigError::Missing("player.mopidy.url"));
            }
            Backend::Mpc => PlayerSettings::Mpc(self.player.mpc),
            Backend::Mopidy => PlayerSettings::Mopidy(self.player.mopidy),
        };

        let volume = Volume::try_from(self.player.volume).map_err(|err| ConfigError::Invalid {
            setting: "player.volume",
            reason: err.to_string(),
        })?;

        if self.controller.tick_interval_ms == 0 {
            return Err(non_zero("controller.tick_interval_ms"));
        }

        if self.sensor.bridge.timeout_secs == 0 {
            return Err(non_zero("sensor.timeout_secs"));
        }
        match &player {
            PlayerSettings::Mpc(mpc) if mpc.timeout_secs == 0 => {
                return Err(non_zero("player.mpc.timeout_secs"));
            }
            PlayerSettings::Mopidy(mopidy) if mopidy.timeout_secs == 0 => {
                return Err(non_zero("player.mopidy.timeout_secs"));
            }
            _ => {}
        }
        if self.controller.shutdown_timeout_secs == 0 {
            return Err(non_zero("controller.shutdown_timeout_secs"));
        }

        if let Err(err) = EnvFilter::try_new(&self.logging.filter) {
            return Err(ConfigError::Invalid {
                setting: "logging.filter",
                reason: err.to_string(),
            });
        }

        Ok(Settings {
            time_zone,
            controller: ControllerSettings {
                window,
                rules: DecisionRules {
                    light_threshold: self.sensor.threshold,
                    presence_uses_window: self.sensor.presence_uses_window,
                },
                volume,
                off_command: self.player.off_command,
                grace_period: Duration::from_secs(self.controller.grace_period_secs),
            },
            control_loop: LoopSettings {
                tick_interval: Duration::from_millis(self.controller.tick_interval_ms),
                shutdown_timeout: Duration::from_secs(self.controller.shutdown_timeout_secs),
            },
            sensor: self.sensor.bridge,
            player,
            log_filter: self.logging.filter,
        })
    }
}

fn parse_time(setting: &'static str, value: Option<&str>) -> Result<TimeOfDay, ConfigError> {
    let value = value
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(setting))?;
    value.trim().parse().map_err(|err: luxplay_domain::error::ValidationError| {
        ConfigError::Invalid {
            setting,
            reason: err.to_string(),
        }
    })
}

fn non_zero(setting: &'static str) -> ConfigError {
    ConfigError::Invalid {
        setting,
        reason: "must be non-zero".to_string(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_zone: "Europe/Amsterdam".to_string(),
            window: WindowConfig::default(),
            sensor: SensorConfig::default(),
            player: PlayerConfig::default(),
            controller: ControllerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            bridge: HueConfig::default(),
            threshold: DEFAULT_LIGHT_THRESHOLD,
            presence_uses_window: true,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            volume: 2,
            off_command: OffCommand::default(),
            mpc: MpcConfig::default(),
            mopidy: MopidyConfig::default(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2000,
            grace_period_secs: 0,
            shutdown_timeout_secs: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A required setting was given neither in the file nor the environment.
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    /// A setting is present but unusable.
    #[error("invalid setting `{setting}`: {reason}")]
    Invalid {
        setting: &'static str,
        reason: String,
    },
}
