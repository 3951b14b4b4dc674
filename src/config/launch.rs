//! Command line launch parameters.

use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

use super::types::ConfigError;

/// The two immutable launch values plus an optional config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchArgs {
    pub port: u16,
    pub password: String,
    pub config_path: Option<PathBuf>,
}

impl LaunchArgs {
    /// Parse `<port> <password> [config.toml]` (program name excluded).
    pub fn parse<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        if !(2..=3).contains(&args.len()) {
            return Err(ConfigError::Usage);
        }

        let port = parse_port(&args[0])?;
        if !is_valid_password(&args[1]) {
            return Err(ConfigError::InvalidPassword);
        }

        Ok(Self {
            port,
            password: args[1].clone(),
            config_path: args.get(2).map(PathBuf::from),
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.parse::<u16>() {
        Ok(port) if (6660..=6669).contains(&port) || port == 6697 => Ok(port),
        _ => Err(ConfigError::InvalidPort(raw.to_string())),
    }
}

fn is_valid_password(password: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9]{3,20}$").expect("password pattern"))
        .is_match(password)
}
