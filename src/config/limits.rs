//! Connection buffer and queue limits.

use serde::Deserialize;

/// Connection buffer and queue limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Bytes requested per socket read (default: 512).
    #[serde(default = "default_read_chunk")]
    pub read_chunk: usize,
    /// Outbound lines queued per connection before sends fail (default: 1024).
    /// A peer whose queue fills up is disconnected.
    #[serde(default = "default_send_queue")]
    pub send_queue: usize,
    /// Bound on a connection's unterminated input (default: unbounded).
    #[serde(default)]
    pub max_pending_bytes: Option<usize>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            read_chunk: default_read_chunk(),
            send_queue: default_send_queue(),
            max_pending_bytes: None,
        }
    }
}

fn default_read_chunk() -> usize {
    ircserv_proto::READ_CHUNK
}

fn default_send_queue() -> usize {
    1024
}
