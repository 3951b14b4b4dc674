//! In-memory server for handler tests.
//!
//! Drives a [`Server`] with raw bytes and records every line it sends, so a
//! test reads like a client transcript.

use crate::network::{RecordingTransport, Server};
use crate::state::{Channel, ServerInfo, Session};
use bytes::Bytes;
use ircserv_proto::{ConnectionId, ReadEvent};

pub const SERVER_NAME: &str = "IRCS";
pub const PASSWORD: &str = "s3cr3t";

pub struct Harness {
    pub server: Server,
    pub transport: RecordingTransport,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_max_pending(None)
    }

    pub fn with_max_pending(max_pending: Option<usize>) -> Self {
        let info = ServerInfo {
            name: SERVER_NAME.to_string(),
            password: PASSWORD.to_string(),
        };
        Self {
            server: Server::new(info, max_pending),
            transport: RecordingTransport::default(),
        }
    }

    pub fn connect(&mut self) -> ConnectionId {
        self.server.accept()
    }

    /// Connect and send the right password.
    pub fn authed(&mut self) -> ConnectionId {
        let id = self.connect();
        self.send(id, &format!("PASS {PASSWORD}"));
        id
    }

    /// Fully register `nick` as `nick!nick@host` and drop the handshake replies.
    pub fn register(&mut self, nick: &str) -> ConnectionId {
        let id = self.authed();
        self.send(id, &format!("NICK {nick}"));
        self.send(id, &format!("USER {nick} host serv :Real Name"));
        assert!(self.session(id).is_registered(), "{nick} did not register");
        self.transport.take(id);
        id
    }

    /// Send one line; the CRLF is appended.
    pub fn send(&mut self, id: ConnectionId, line: &str) {
        self.feed(id, format!("{line}\r\n").as_bytes());
    }

    pub fn feed(&mut self, id: ConnectionId, bytes: &[u8]) {
        let event = ReadEvent::Data(Bytes::copy_from_slice(bytes));
        self.server.on_read(id, event, &mut self.transport);
    }

    /// Peer hung up.
    pub fn close(&mut self, id: ConnectionId) {
        self.server.on_read(id, ReadEvent::Closed, &mut self.transport);
    }

    pub fn take(&mut self, id: ConnectionId) -> Vec<String> {
        self.transport.take(id)
    }

    pub fn clear(&mut self) {
        self.transport.clear();
    }

    pub fn session(&self, id: ConnectionId) -> &Session {
        self.server
            .matrix()
            .sessions
            .get(id)
            .expect("session exists")
    }

    pub fn channel(&self, name: &str) -> &Channel {
        self.server
            .matrix()
            .channels
            .find(name)
            .expect("channel exists")
    }
}
