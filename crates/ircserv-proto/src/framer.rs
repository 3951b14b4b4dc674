//! Per-connection reassembly of the inbound byte stream.
//!
//! Sockets hand over whatever bytes happen to be available: half a line,
//! several lines, or a line and a half. The [`Framer`] keeps one pending
//! buffer per connection and yields only complete lines.

use std::collections::HashMap;

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;

use crate::error::Result;
use crate::line::LineCodec;

/// Identifier assigned to a connection when it is accepted.
pub type ConnectionId = u64;

/// Outcome of one read from a connection.
#[derive(Debug)]
pub enum ReadEvent {
    /// Bytes arrived (possibly without a complete line).
    Data(Bytes),
    /// Zero-byte read: the peer closed the connection.
    Closed,
    /// The read itself failed.
    Failed(std::io::Error),
}

#[derive(Debug, Default)]
struct Pending {
    codec: LineCodec,
    buf: BytesMut,
}

/// Pending input buffers, keyed by connection.
#[derive(Debug, Default)]
pub struct Framer {
    pending: HashMap<ConnectionId, Pending>,
    max_pending: Option<usize>,
}

impl Framer {
    /// Create a framer with unbounded per-connection buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a framer that rejects more than `limit` undelimited bytes.
    pub fn with_max_pending(limit: Option<usize>) -> Self {
        Self {
            pending: HashMap::new(),
            max_pending: limit,
        }
    }

    /// Append `bytes` to the connection's buffer and extract every complete line.
    ///
    /// Returns an empty vector when no delimiter has arrived yet; the partial
    /// data is kept for the next call.
    pub fn feed(&mut self, id: ConnectionId, bytes: &[u8]) -> Result<Vec<String>> {
        let max_pending = self.max_pending;
        let pending = self.pending.entry(id).or_insert_with(|| Pending {
            codec: max_pending.map_or_else(LineCodec::new, LineCodec::with_max_pending),
            buf: BytesMut::new(),
        });
        pending.buf.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(line) = pending.codec.decode(&mut pending.buf)? {
            lines.push(line);
        }
        Ok(lines)
    }

    /// Number of bytes held for `id` without a delimiter.
    pub fn pending_len(&self, id: ConnectionId) -> usize {
        self.pending.get(&id).map_or(0, |p| p.buf.len())
    }

    /// Drop the connection's buffer.
    pub fn remove(&mut self, id: ConnectionId) {
        self.pending.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn partial_then_complete() {
        let mut framer = Framer::new();
        assert!(framer.feed(4, b"NICK al").unwrap().is_empty());
        assert_eq!(framer.pending_len(4), 7);
        assert_eq!(framer.feed(4, b"ice\r\n").unwrap(), vec!["NICK alice"]);
        assert_eq!(framer.pending_len(4), 0);
    }

    #[test]
    fn connections_are_independent() {
        let mut framer = Framer::new();
        assert!(framer.feed(1, b"PASS se").unwrap().is_empty());
        assert_eq!(framer.feed(2, b"PASS other\r\n").unwrap(), vec!["PASS other"]);
        assert_eq!(framer.feed(1, b"cret\r\n").unwrap(), vec!["PASS secret"]);
    }

    #[test]
    fn remove_discards_partial_data() {
        let mut framer = Framer::new();
        framer.feed(9, b"JOIN #a").unwrap();
        framer.remove(9);
        assert_eq!(framer.feed(9, b"\r\n").unwrap(), vec![""]);
    }

    #[test]
    fn bounded_framer_rejects_runaway_lines() {
        let mut framer = Framer::with_max_pending(Some(16));
        assert!(framer.feed(1, &[b'x'; 17]).is_err());
    }

    proptest! {
        #[test]
        fn reassembly_is_chunk_boundary_invariant(
            lines in prop::collection::vec("[ -~]{0,40}", 0..8),
            cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..12),
        ) {
            let stream: Vec<u8> = lines.iter().flat_map(|l| {
                let mut v = l.as_bytes().to_vec();
                v.extend_from_slice(b"\r\n");
                v
            }).collect();

            let mut offsets: Vec<usize> = cuts.iter().map(|i| i.index(stream.len() + 1)).collect();
            offsets.push(0);
            offsets.push(stream.len());
            offsets.sort_unstable();
            offsets.dedup();

            let mut framer = Framer::new();
            let mut out = Vec::new();
            for pair in offsets.windows(2) {
                out.extend(framer.feed(7, &stream[pair[0]..pair[1]]).unwrap());
            }

            prop_assert_eq!(out, lines);
            prop_assert_eq!(framer.pending_len(7), 0);
        }
    }
}
