//! mpc backend configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the mpc-driven player.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MpcConfig {
    /// MPD host passed to `mpc -h`.
    pub host: String,
    /// MPD port passed to `mpc -p`, when not the default.
    pub port: Option<u16>,
    /// Name or path of the mpc executable.
    pub binary: String,
    /// Stored playlist loaded at startup, if any.
    pub playlist: Option<String>,
    /// Upper bound for a single mpc invocation, in seconds.
    pub timeout_secs: u16,
}

impl MpcConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_secs))
    }
}

impl Default for MpcConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: None,
            binary: "mpc".to_string(),
            playlist: None,
            timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = MpcConfig::default();
        assert!(config.host.is_empty());
        assert_eq!(config.binary, "mpc");
        assert!(config.port.is_none());
        assert!(config.playlist.is_none());
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            host = "192.168.1.30"
            port = 6601
            binary = "/usr/local/bin/mpc"
            playlist = "evening"
            timeout_secs = 3
        "#;
        let config: MpcConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.host, "192.168.1.30");
        assert_eq!(config.port, Some(6601));
        assert_eq!(config.binary, "/usr/local/bin/mpc");
        assert_eq!(config.playlist.as_deref(), Some("evening"));
        assert_eq!(config.timeout_secs, 3);
    }
}
