//! CRLF line codec for tokio.
//!
//! Reads and writes `\r\n`-terminated lines. The decoder never assumes a line
//! fits in a single read: bytes without a delimiter stay in the buffer until
//! a later read completes them.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{ProtocolError, Result};

/// The IRC line delimiter.
pub const CRLF: &[u8] = b"\r\n";

/// Line-based codec that handles CRLF-terminated messages.
///
/// Unbounded by default; [`LineCodec::with_max_pending`] caps how many bytes
/// may accumulate without a delimiter.
#[derive(Debug, Default, Clone)]
pub struct LineCodec {
    /// Index of next byte to check for a delimiter
    next_index: usize,
    /// Upper bound on undelimited bytes
    max_pending: Option<usize>,
}

impl LineCodec {
    /// Create an unbounded codec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec that fails once more than `limit` bytes are pending.
    pub fn with_max_pending(limit: usize) -> Self {
        Self {
            next_index: 0,
            max_pending: Some(limit),
        }
    }

    fn check_pending(&self, pending: usize) -> Result<()> {
        match self.max_pending {
            Some(limit) if pending > limit => Err(ProtocolError::PendingTooLong {
                actual: pending,
                limit,
            }),
            _ => Ok(()),
        }
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        let start = self.next_index.min(src.len());
        if let Some(offset) = src[start..].windows(CRLF.len()).position(|w| w == CRLF) {
            let end = start + offset;
            let line = src.split_to(end + CRLF.len());
            self.next_index = 0;

            let text = String::from_utf8_lossy(&line[..end]).into_owned();
            Ok(Some(text))
        } else {
            // A '\r' at the very end may pair with a '\n' from the next read.
            self.next_index = src.len().saturating_sub(1);
            self.check_pending(src.len())?;
            Ok(None)
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<()> {
        <Self as Encoder<&str>>::encode(self, line.as_str(), dst)
    }
}

impl Encoder<&str> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: &str, dst: &mut BytesMut) -> Result<()> {
        dst.reserve(line.len() + CRLF.len());
        dst.put_slice(line.as_bytes());
        dst.put_slice(CRLF);
        Ok(())
    }
}

/// Append the line delimiter to an outgoing line.
pub fn encode(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + CRLF.len());
    out.push_str(line);
    out.push_str("\r\n");
    out
}
