//! Event-driven server core.
//!
//! `Server` owns everything the protocol needs (sessions, channels, pending
//! input and the command registry) and is driven one [`ReadEvent`] at a time.
//! It never touches a socket: output goes through a [`Transport`].

use crate::error::HandlerError;
use crate::handlers::{Context, Registry};
use crate::network::Transport;
use crate::state::{Matrix, ServerInfo};
use ircserv_proto::{ConnectionId, Framer, Line, ReadEvent};
use tracing::{debug, info, warn};

/// Reason given to peers when a connection is dropped for a failed send.
const SEND_FAILURE_REASON: &str = "connection lost";

/// Sessions, channels, pending input and the command registry.
pub struct Server {
    matrix: Matrix,
    framer: Framer,
    registry: Registry,
    next_id: ConnectionId,
}

impl Server {
    pub fn new(server_info: ServerInfo, max_pending: Option<usize>) -> Self {
        Self {
            matrix: Matrix::new(server_info),
            framer: Framer::with_max_pending(max_pending),
            registry: Registry::new(),
            next_id: 1,
        }
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Allocate an id and a fresh session for a new connection.
    pub fn accept(&mut self) -> ConnectionId {
        let id = self.next_id;
        self.next_id += 1;
        self.matrix.connect(id);
        debug!(conn = id, "session created");
        id
    }

    /// Process one read outcome for `id`.
    ///
    /// Lines are executed in arrival order; anything left in the buffer after
    /// the session goes away is discarded.
    pub fn on_read(&mut self, id: ConnectionId, event: ReadEvent, transport: &mut dyn Transport) {
        if !self.matrix.sessions.contains(id) {
            debug!(conn = id, "event for unknown connection dropped");
            return;
        }

        let mut failed = Vec::new();
        match event {
            ReadEvent::Data(bytes) => match self.framer.feed(id, &bytes) {
                Ok(lines) => {
                    for raw in lines {
                        if !self.matrix.sessions.contains(id) {
                            break;
                        }
                        self.execute(id, &Line::parse(&raw), transport, &mut failed);
                    }
                }
                Err(e) => {
                    warn!(conn = id, error = %e, "dropping connection");
                    self.disconnect(id, &e.to_string(), transport, &mut failed);
                }
            },
            ReadEvent::Closed => {
                self.execute(id, &Line::new("QUIT", "disconnected"), transport, &mut failed);
            }
            ReadEvent::Failed(e) => {
                warn!(conn = id, error = %e, "read failed");
                self.execute(id, &Line::new("QUIT", "read error"), transport, &mut failed);
            }
        }

        self.reap(failed, transport);
    }

    fn execute(
        &mut self,
        id: ConnectionId,
        line: &Line,
        transport: &mut dyn Transport,
        failed: &mut Vec<ConnectionId>,
    ) {
        let mut ctx = Context::new(id, &mut self.matrix, transport, failed, line);
        match self.registry.dispatch(&mut ctx, line) {
            Ok(()) => {}
            Err(HandlerError::Quit(reason)) => self.disconnect(id, &reason, transport, failed),
            Err(HandlerError::Send(e)) => debug!(conn = id, error = %e, "delivery failed"),
            Err(e) => warn!(conn = id, error = %e, "handler error"),
        }
    }

    /// Remove `id` from the server and tell its channel peers.
    fn disconnect(
        &mut self,
        id: ConnectionId,
        reason: &str,
        transport: &mut dyn Transport,
        failed: &mut Vec<ConnectionId>,
    ) {
        let peers = self.matrix.channels.peers_of(id);
        let Some((session, channels)) = self.matrix.disconnect(id) else {
            return;
        };

        let line = format!(":{} QUIT :{reason}", session.mask());
        for peer in peers {
            if let Err(e) = transport.send(peer, &line) {
                debug!(conn = peer, error = %e, "quit notice not delivered");
                if !failed.contains(&peer) {
                    failed.push(peer);
                }
            }
        }

        self.framer.remove(id);
        transport.close(id);
        info!(conn = id, nick = %session.nick, channels = channels.len(), %reason, "client disconnected");
    }

    /// Disconnect every peer whose delivery failed, including peers that
    /// fail while the earlier ones are being announced.
    fn reap(&mut self, mut failed: Vec<ConnectionId>, transport: &mut dyn Transport) {
        while let Some(id) = failed.pop() {
            self.disconnect(id, SEND_FAILURE_REASON, transport, &mut failed);
        }
    }
}
