//! Configuration loading and management.
//!
//! - `launch`: the `<port> <password> [config.toml]` command line
//! - `types`: Config, ServerConfig, LogConfig and loading
//! - `listen`: Network listener configuration
//! - `limits`: Buffer and queue limits
//! - `validation`: Startup checks

mod launch;
mod limits;
mod listen;
mod types;
pub mod validation;

pub use launch::LaunchArgs;
pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use types::{Config, ConfigError, LogConfig, ServerConfig};
