//! Error types for the protocol library.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Protocol-level failures raised while framing a byte stream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A connection buffered more bytes without a line delimiter than allowed.
    #[error("pending input too long: {actual} bytes (limit: {limit})")]
    PendingTooLong {
        /// Bytes currently buffered.
        actual: usize,
        /// Configured bound.
        limit: usize,
    },
}
