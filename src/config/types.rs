//! Core configuration types and loading.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use super::launch::LaunchArgs;
use super::limits::LimitsConfig;
use super::listen::ListenConfig;
use super::validation::{validate, ValidationError};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("usage: ircserv <port> <password> [config.toml]")]
    Usage,
    #[error("invalid port '{0}': must be 6660-6669 or 6697")]
    InvalidPort(String),
    #[error("invalid password: must be 3-20 alphanumeric characters")]
    InvalidPassword,
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Server configuration.
///
/// Every section is optional in the TOML file; a missing file section takes
/// its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server identity.
    pub server: ServerConfig,
    /// Network listen configuration.
    pub listen: ListenConfig,
    /// Buffer and queue limits.
    pub limits: LimitsConfig,
    /// Logging configuration.
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Build the runtime configuration from launch arguments.
    ///
    /// Loads the optional config file, then validates the result.
    pub fn from_launch(args: &LaunchArgs) -> Result<Self, ConfigError> {
        let config = match &args.config_path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Socket address to bind for the given port.
    pub fn bind_addr(&self, port: u16) -> SocketAddr {
        SocketAddr::new(self.listen.address, port)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server name used as reply prefix and PING target.
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "IRCS".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
