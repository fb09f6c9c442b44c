//! Mopidy backend configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the Mopidy JSON-RPC player.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MopidyConfig {
    /// Base URL of the Mopidy HTTP frontend, e.g. `http://localhost:6680`.
    pub url: String,
    /// Request timeout, in seconds.
    pub timeout_secs: u16,
}

impl MopidyConfig {
    /// The JSON-RPC endpoint under the base URL. A bare `host:port` is
    /// taken as plain HTTP.
    #[must_use]
    pub fn rpc_endpoint(&self) -> String {
        let url = self.url.trim().trim_end_matches('/');
        if url.starts_with("http://") || url.starts_with("https://") {
            format!("{url}/mopidy/rpc")
        } else {
            format!("http://{url}/mopidy/rpc")
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_secs))
    }
}

impl Default for MopidyConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = MopidyConfig::default();
        assert!(config.url.is_empty());
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn should_strip_trailing_slash_from_url() {
        let config = MopidyConfig {
            url: "http://10.0.0.4:6680/".to_string(),
            ..MopidyConfig::default()
        };
        assert_eq!(config.rpc_endpoint(), "http://10.0.0.4:6680/mopidy/rpc");
    }

    #[test]
    fn should_default_to_http_for_bare_host() {
        let config = MopidyConfig {
            url: "localhost:6680".to_string(),
            ..MopidyConfig::default()
        };
        assert_eq!(config.rpc_endpoint(), "http://localhost:6680/mopidy/rpc");
    }

    #[test]
    fn should_deserialize_from_toml() {
        let config: MopidyConfig = toml::from_str(
            r#"
            url = "http://music:6680"
            timeout_secs = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.url, "http://music:6680");
        assert_eq!(config.timeout_secs, 2);
    }
}
