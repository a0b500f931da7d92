//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `doorbridge.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use doorbridge_adapter_discovery_sqlx::ConnectorConfig;
use doorbridge_adapter_hub_reqwest::HubClientConfig;
use doorbridge_domain::hub::{DEFAULT_HUB_PORT, HubEndpoint};
use doorbridge_domain::setup::SetupPlan;
use secrecy::SecretString;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Hub the doors are driven through.
    pub hub: HubConfig,
    /// Door database connection settings.
    pub discovery: ConnectorConfig,
    /// Which doors to register at startup.
    pub setup: SetupPlan,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Hub configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Hostname or IP address of the hub.
    pub host: String,
    /// Web service port. When unset, manual setups use the standard port and
    /// database setups read it from the database.
    pub port: Option<u16>,
    /// Upper bound on one door command.
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from `doorbridge.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("doorbridge.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("DOORBRIDGE_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("DOORBRIDGE_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("DOORBRIDGE_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("DOORBRIDGE_HUB_HOST") {
            self.hub.host = val;
        }
        if let Some(port) = var("DOORBRIDGE_HUB_PORT").and_then(|val| val.parse().ok()) {
            self.hub.port = Some(port);
        }
        if let Some(val) = var("DOORBRIDGE_DB_PASSWORD") {
            if let SetupPlan::Auto { database, .. } = &mut self.setup {
                database.password = SecretString::from(val);
            }
        }
        if let Some(val) = var("DOORBRIDGE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.hub.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "hub.timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.discovery.connect_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "discovery.connect_timeout_secs must be non-zero".to_string(),
            ));
        }
        HubEndpoint::new(&self.hub.host, self.hub.port.unwrap_or(DEFAULT_HUB_PORT))
            .map_err(|err| ConfigError::Validation(format!("hub: {err}")))?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the settings of the hub HTTP client.
    #[must_use]
    pub fn hub_client(&self) -> HubClientConfig {
        HubClientConfig {
            timeout_secs: self.hub.timeout_secs,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "doorbridged=info,doorbridge=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: None,
            timeout_secs: HubClientConfig::default().timeout_secs,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
