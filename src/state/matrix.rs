//! The Matrix - central server state.
//!
//! Owned by the event loop and touched by nothing else, so plain collections
//! suffice.

use super::registry::ChannelRegistry;
use super::session::{Session, SessionTable};
use ircserv_proto::ConnectionId;

/// This server's identity and launch secret.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    /// Reply prefix and the only accepted PING target.
    pub name: String,
    /// Compared verbatim against PASS.
    pub password: String,
}

/// The Matrix - all sessions and channels.
#[derive(Debug)]
pub struct Matrix {
    pub server_info: ServerInfo,
    pub sessions: SessionTable,
    pub channels: ChannelRegistry,
}

impl Matrix {
    pub fn new(server_info: ServerInfo) -> Self {
        Self {
            server_info,
            sessions: SessionTable::default(),
            channels: ChannelRegistry::default(),
        }
    }

    /// Register a freshly accepted connection.
    pub fn connect(&mut self, id: ConnectionId) {
        self.sessions.insert(Session::new(id));
    }

    /// Remove a session after dropping it from every channel.
    ///
    /// Returns the session and the names of the channels it was in.
    pub fn disconnect(&mut self, id: ConnectionId) -> Option<(Session, Vec<String>)> {
        let left = self.channels.forget(id);
        let session = self.sessions.remove(id)?;
        Some((session, left))
    }

    /// Nickname for `id`, if the session exists.
    pub fn nick_of(&self, id: ConnectionId) -> Option<&str> {
        self.sessions.get(id).map(|s| s.nick.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Matrix {
        Matrix::new(ServerInfo {
            name: "IRCS".to_string(),
            password: "pw".to_string(),
        })
    }

    #[test]
    fn connect_uses_placeholder() {
        let mut m = matrix();
        m.connect(1);
        assert_eq!(m.nick_of(1), Some("User1"));
    }

    #[test]
    fn disconnect_cleans_channels() {
        let mut m = matrix();
        m.connect(1);
        m.connect(2);
        m.channels.create_and_join("#solo", "", 1);
        m.channels.create_and_join("#shared", "", 2);
        m.channels.find_mut("#shared").unwrap().add_member(1);

        let (session, left) = m.disconnect(1).unwrap();
        assert_eq!(session.id, 1);
        assert_eq!(left.len(), 2);
        assert!(m.channels.find("#solo").is_none());
        assert!(!m.channels.find("#shared").unwrap().is_member(1));
        assert!(m.disconnect(1).is_none());
    }
}
