// Configuration for the now playing display
//
// Settings come from an optional JSON file; command line options override
// individual values after loading.

use std::fs;
use std::path::Path;
use std::time::Duration;
use log::debug;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use url::Url;

use crate::logging::LoggingConfig;
use crate::screenblank::ProfileKind;

/// Port used when the configured host doesn't name one
pub const DEFAULT_SERVER_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid server address '{0}': {1}")]
    InvalidUrl(String, String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Host name or URL of the playback server
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub screenblanker_profile: ProfileKind,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Program used to control screen blanking
    #[serde(default = "default_screen_power_command")]
    pub screen_power_command: String,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_screen_power_command() -> String {
    "xset".to_string()
}

fn default_logging() -> LoggingConfig {
    LoggingConfig::for_display()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: default_host(),
            screenblanker_profile: ProfileKind::default(),
            poll_interval_ms: default_poll_interval_ms(),
            screen_power_command: default_screen_power_command(),
            logging: default_logging(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&content)?;
        debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// The server base URL built from `host`
    pub fn server_url(&self) -> Result<String, ConfigError> {
        construct_server_url(&self.host)
    }
}

/// Build the server base URL from a host string
///
/// `host` can be `name`, `name:port` or a full URL with scheme and base
/// path (e.g. behind a proxy). A missing scheme becomes `http`, a missing
/// port becomes [`DEFAULT_SERVER_PORT`]. Query and fragment are dropped and
/// the result never ends in `/`.
pub fn construct_server_url(host: &str) -> Result<String, ConfigError> {
    let host = host.trim();
    let with_scheme = if host.contains("://") {
        host.to_string()
    } else {
        // "localhost:5000" would otherwise parse with "localhost" as the scheme
        format!("http://{}", host)
    };

    let invalid = |reason: String| ConfigError::InvalidUrl(host.to_string(), reason);

    let mut url = Url::parse(&with_scheme).map_err(|e| invalid(e.to_string()))?;
    if url.host_str().map_or(true, |h| h.is_empty()) {
        return Err(invalid("no host name".to_string()));
    }

    if !has_explicit_port(&with_scheme) {
        url.set_port(Some(DEFAULT_SERVER_PORT))
            .map_err(|_| invalid("cannot set a port".to_string()))?;
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Url drops ports that match the scheme default, so look at the text
fn has_explicit_port(url: &str) -> bool {
    let rest = match url.split_once("://") {
        Some((_, rest)) => rest,
        None => url,
    };
    let authority = rest.split(|c: char| c == '/' || c == '?' || c == '#').next().unwrap_or("");
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    // skip over an IPv6 literal
    let after_host = match host_port.rfind(']') {
        Some(idx) => &host_port[idx + 1..],
        None => host_port,
    };
    match after_host.rsplit_once(':') {
        Some((_, port)) => !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bare_host_gets_scheme_and_port() {
        assert_eq!(construct_server_url("localhost").unwrap(), "http://localhost:5000");
        assert_eq!(construct_server_url("192.168.1.20").unwrap(), "http://192.168.1.20:5000");
    }

    #[test]
    fn test_host_with_port() {
        assert_eq!(construct_server_url("mopidy:6680").unwrap(), "http://mopidy:6680");
        assert_eq!(construct_server_url("localhost:5000").unwrap(), "http://localhost:5000");
    }

    #[test]
    fn test_explicit_default_port_is_not_replaced() {
        assert_eq!(construct_server_url("http://proxy:80/piju").unwrap(), "http://proxy/piju");
        assert_eq!(construct_server_url("proxy:80").unwrap(), "http://proxy");
    }

    #[test]
    fn test_full_url_with_base_path() {
        assert_eq!(
            construct_server_url("https://proxy.example/piju/?x=1#top").unwrap(),
            "https://proxy.example:5000/piju"
        );
        assert_eq!(
            construct_server_url("http://proxy.example:8080/piju").unwrap(),
            "http://proxy.example:8080/piju"
        );
    }

    #[test]
    fn test_ipv6_literal() {
        assert_eq!(construct_server_url("[::1]").unwrap(), "http://[::1]:5000");
        assert_eq!(construct_server_url("[::1]:7000").unwrap(), "http://[::1]:7000");
    }

    #[test]
    fn test_invalid_host() {
        assert!(matches!(construct_server_url(""), Err(ConfigError::InvalidUrl(_, _))));
        assert!(matches!(construct_server_url("http://"), Err(ConfigError::InvalidUrl(_, _))));
        assert!(matches!(construct_server_url("host:99999"), Err(ConfigError::InvalidUrl(_, _))));
    }

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.host, "localhost");
        assert_eq!(config.screenblanker_profile, ProfileKind::None);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.screen_power_command, "xset");
        assert_eq!(config.server_url().unwrap(), "http://localhost:5000");
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"host": "piju:5001", "screenblanker_profile": "onoff", "poll_interval_ms": 500}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.host, "piju:5001");
        assert_eq!(config.screenblanker_profile, ProfileKind::OnWhenPlaying);
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_config_errors() {
        assert!(matches!(AppConfig::from_file("/nonexistent/nowplaying.json"), Err(ConfigError::Io(_))));
        assert!(matches!(AppConfig::from_json("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            AppConfig::from_json(r#"{"screenblanker_profile": "always"}"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
