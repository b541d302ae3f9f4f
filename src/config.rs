use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dns_consts;

const DEFAULT_CONFIG_FILE: &str = "dns-probe.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// `host:port` of the recursive resolver
    pub address: String,

    /// Seconds to wait for the response; 0 waits forever
    pub timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            address: dns_consts::DEFAULT_RESOLVER.to_string(),
            timeout_secs: 5,
        }
    }
}

impl ResolverConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub resolver: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration, then apply command-line overrides
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dns-probe.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&Path>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.display().to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(resolver) = overrides.resolver {
            self.resolver.address = resolver;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.resolver.timeout_secs = timeout;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "resolver address must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
