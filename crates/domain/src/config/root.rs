use serde::Deserialize;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;
use crate::nameserver::NameServer;
use crate::override_record::OverrideRecord;

const LOCAL_CONFIG_PATH: &str = "pinpoint-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/pinpoint-dns/config.toml";

/// Main configuration structure for Pinpoint DNS
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Upstream nameservers, tried in listed order
    #[serde(default)]
    pub nameservers: Vec<String>,

    /// Override records, first match wins
    #[serde(default)]
    pub records: Vec<OverrideRecord>,

    /// Listener configuration (bind address, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Forwarding behaviour (strategy, timeouts)
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate configuration
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. pinpoint-dns.toml in current directory
    /// 3. /etc/pinpoint-dns/config.toml
    ///
    /// There is no built-in default: a missing file is an error.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_string(),
            None => Self::get_config_path().ok_or_else(|| {
                ConfigError::NotFound(format!("{}, {}", LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH))
            })?,
        };

        let mut config = Self::from_file(&path)?;
        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text without validating it
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    ///
    /// An empty nameserver list is accepted: every query that no override
    /// answers then gets SERVFAIL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.upstream.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream.query_timeout_ms cannot be 0".to_string(),
            ));
        }

        self.parsed_nameservers()?;

        for (index, record) in self.records.iter().enumerate() {
            if record.values.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Record #{} ({} -> {}) has no values",
                    index, record.record_type, record.target
                )));
            }
        }

        Ok(())
    }

    /// Parse every nameserver string, preserving order
    pub fn parsed_nameservers(&self) -> Result<Vec<NameServer>, ConfigError> {
        self.nameservers
            .iter()
            .map(|raw| {
                raw.parse::<NameServer>()
                    .map_err(|e| ConfigError::Validation(format!("Nameserver '{}': {}", raw, e)))
            })
            .collect()
    }

    /// Get the path to the configuration file that would be used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|path| std::path::Path::new(path).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
