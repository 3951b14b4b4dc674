//! Outbound delivery seam between the server core and the sockets.
//!
//! The core never awaits a write. Every line is pushed into the peer's
//! bounded queue with `try_send`; the peer's writer task drains it. A full or
//! closed queue is reported back as a [`SendError`] for that peer only.

use crate::error::{SendError, SendFailure};
use ircserv_proto::ConnectionId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::AbortHandle;

/// How long a closed peer's writer may keep flushing before it is aborted.
const CLOSE_GRACE: Duration = Duration::from_secs(5);

/// Line delivery to connections, addressed by id. Lines carry no CRLF.
pub trait Transport {
    fn send(&mut self, to: ConnectionId, line: &str) -> Result<(), SendError>;

    /// Stop reading from `id` and close it once queued lines are written.
    fn close(&mut self, id: ConnectionId);
}

struct Peer {
    outgoing: mpsc::Sender<String>,
    reader: AbortHandle,
    writer: AbortHandle,
}

/// [`Transport`] over per-connection mpsc queues.
pub struct QueueTransport {
    peers: HashMap<ConnectionId, Peer>,
    close_grace: Duration,
}

impl Default for QueueTransport {
    fn default() -> Self {
        Self::with_close_grace(CLOSE_GRACE)
    }
}

impl QueueTransport {
    /// A transport whose closed writers are aborted after `close_grace`.
    pub fn with_close_grace(close_grace: Duration) -> Self {
        Self {
            peers: HashMap::new(),
            close_grace,
        }
    }

    pub fn register(
        &mut self,
        id: ConnectionId,
        outgoing: mpsc::Sender<String>,
        reader: AbortHandle,
        writer: AbortHandle,
    ) {
        self.peers.insert(
            id,
            Peer {
                outgoing,
                reader,
                writer,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Close every connection (shutdown). Unwritten lines are dropped.
    pub fn close_all(&mut self) {
        for (_, peer) in self.peers.drain() {
            peer.reader.abort();
            peer.writer.abort();
        }
    }
}

impl Transport for QueueTransport {
    fn send(&mut self, to: ConnectionId, line: &str) -> Result<(), SendError> {
        let peer = self.peers.get(&to).ok_or(SendError {
            id: to,
            failure: SendFailure::Closed,
        })?;
        peer.outgoing
            .try_send(line.to_string())
            .map_err(|e| SendError {
                id: to,
                failure: match e {
                    TrySendError::Full(_) => SendFailure::QueueFull,
                    TrySendError::Closed(_) => SendFailure::Closed,
                },
            })
    }

    fn close(&mut self, id: ConnectionId) {
        let Some(Peer {
            outgoing,
            reader,
            writer,
        }) = self.peers.remove(&id)
        else {
            return;
        };
        reader.abort();
        // The writer drains what is queued and exits once the sender is gone,
        // unless it is stuck on a peer that stopped reading.
        drop(outgoing);
        let grace = self.close_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            writer.abort();
        });
    }
}

/// Records every line per connection; selected peers can be made to fail.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub sent: HashMap<ConnectionId, Vec<String>>,
    pub closed: Vec<ConnectionId>,
    pub failing: std::collections::HashSet<ConnectionId>,
}

#[cfg(test)]
impl RecordingTransport {
    /// Lines sent to `id`, oldest first.
    pub fn lines(&self, id: ConnectionId) -> &[String] {
        self.sent.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Drain and return the lines sent to `id`.
    pub fn take(&mut self, id: ConnectionId) -> Vec<String> {
        self.sent.remove(&id).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

#[cfg(test)]
impl Transport for RecordingTransport {
    fn send(&mut self, to: ConnectionId, line: &str) -> Result<(), SendError> {
        if self.failing.contains(&to) {
            return Err(SendError {
                id: to,
                failure: SendFailure::Closed,
            });
        }
        self.sent.entry(to).or_default().push(line.to_string());
        Ok(())
    }

    fn close(&mut self, id: ConnectionId) {
        self.closed.push(id);
    }
}
