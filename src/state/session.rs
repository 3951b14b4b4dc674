//! Per-connection session state and the session table.
//!
//! ## Registration
//!
//! ```text
//! Unauthenticated ──PASS──▶ Authenticated ──NICK──▶ UserPending ──USER──┐
//!                                 │                                     ▼
//!                                 └──────USER──▶ NickPending ──NICK──▶ Registered
//! ```
//!
//! The phase is derived from four flags; `registered` flips exactly once.

use ircserv_proto::{irc_to_lower, ConnectionId};
use std::collections::{BTreeMap, HashMap};

/// Where a session stands in the registration handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unauthenticated,
    Authenticated,
    /// USER done, waiting for NICK.
    NickPending,
    /// NICK done, waiting for USER.
    UserPending,
    Registered,
}

/// One connected client.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: ConnectionId,
    pub nick: String,
    pub user: String,
    pub host: String,
    pub server: String,
    pub realname: String,
    /// Server operator. OPER is not implemented, so this stays false.
    pub operator: bool,
    pub authenticated: bool,
    pub nick_set: bool,
    pub user_set: bool,
    registered: bool,
}

impl Session {
    /// Fresh session with placeholder identity `User<id>@localhost`.
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            nick: format!("User{id}"),
            user: String::new(),
            host: "localhost".to_string(),
            server: String::new(),
            realname: String::new(),
            operator: false,
            authenticated: false,
            nick_set: false,
            user_set: false,
            registered: false,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.authenticated, self.nick_set, self.user_set, self.registered) {
            (_, _, _, true) => Phase::Registered,
            (false, _, _, _) => Phase::Unauthenticated,
            (true, true, false, _) => Phase::UserPending,
            (true, false, true, _) => Phase::NickPending,
            _ => Phase::Authenticated,
        }
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Mark the session registered once both NICK and USER succeeded.
    ///
    /// Returns true only on the transition, so the caller welcomes exactly once.
    pub fn try_register(&mut self) -> bool {
        if self.registered || !self.nick_set || !self.user_set {
            return false;
        }
        self.registered = true;
        true
    }

    /// `nick!user@host`, as used in message prefixes.
    pub fn mask(&self) -> String {
        format!("{}!{}@{}", self.nick, self.user, self.host)
    }
}

/// All live sessions, with a case-folded nickname index.
///
/// Only nicknames chosen with NICK are indexed; placeholders are not.
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: BTreeMap<ConnectionId, Session>,
    nicks: HashMap<String, ConnectionId>,
}

impl SessionTable {
    pub fn insert(&mut self, session: Session) {
        if session.nick_set {
            self.nicks.insert(irc_to_lower(&session.nick), session.id);
        }
        self.sessions.insert(session.id, session);
    }

    /// Remove a session and its nickname index entry.
    pub fn remove(&mut self, id: ConnectionId) -> Option<Session> {
        let session = self.sessions.remove(&id)?;
        if session.nick_set {
            let key = irc_to_lower(&session.nick);
            if self.nicks.get(&key) == Some(&id) {
                self.nicks.remove(&key);
            }
        }
        Some(session)
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: ConnectionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Case-insensitive nickname lookup.
    pub fn find_by_nick(&self, nick: &str) -> Option<&Session> {
        let id = self.nicks.get(&irc_to_lower(nick))?;
        self.sessions.get(id)
    }

    /// Whether a session other than `except` holds `nick`.
    pub fn nick_in_use(&self, nick: &str, except: ConnectionId) -> bool {
        self.nicks
            .get(&irc_to_lower(nick))
            .is_some_and(|&owner| owner != except)
    }

    /// Set a session's nickname, keeping the index consistent.
    ///
    /// Returns the previous nickname. The caller checks uniqueness first.
    pub fn set_nick(&mut self, id: ConnectionId, nick: &str) -> Option<String> {
        let session = self.sessions.get_mut(&id)?;
        if session.nick_set {
            self.nicks.remove(&irc_to_lower(&session.nick));
        }
        let old = std::mem::replace(&mut session.nick, nick.to_string());
        session.nick_set = true;
        self.nicks.insert(irc_to_lower(nick), id);
        Some(old)
    }

    /// Whether any session other than `except` uses `username`.
    pub fn username_in_use(&self, username: &str, except: ConnectionId) -> bool {
        self.sessions
            .values()
            .any(|s| s.id != except && s.user_set && s.user == username)
    }

    /// `username`, or `username<n>` with the smallest `n >= 1` not in use.
    pub fn unique_username(&self, username: &str, except: ConnectionId) -> String {
        if !self.username_in_use(username, except) {
            return username.to_string();
        }
        (1u64..)
            .map(|n| format!("{username}{n}"))
            .find(|candidate| !self.username_in_use(candidate, except))
            .unwrap_or_else(|| username.to_string())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.sessions.keys().copied()
    }
}
