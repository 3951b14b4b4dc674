//! Network listener configuration.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

/// Network listener configuration.
///
/// The port always comes from the command line.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Interface to bind to (default: `0.0.0.0`).
    pub address: IpAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        }
    }
}
