//! Channel state: membership, operators, invites and modes.
//!
//! Members are stored as connection ids and resolved through the session
//! table when names are needed.

use ircserv_proto::{ConnectionId, Response};
use std::collections::BTreeSet;

/// A channel and its moderation state.
#[derive(Debug, Clone)]
pub struct Channel {
    /// Display name, case as first created.
    pub name: String,
    pub topic: String,
    /// Join key; empty means none.
    pub key: String,
    pub invite_only: bool,
    pub topic_restricted: bool,
    /// Member limit; `None` is unbounded.
    pub limit: Option<usize>,
    members: BTreeSet<ConnectionId>,
    operators: BTreeSet<ConnectionId>,
    invites: BTreeSet<ConnectionId>,
}

impl Channel {
    /// An empty channel. It must gain a member before it is registered.
    pub fn new(name: &str, key: &str) -> Self {
        Self {
            name: name.to_string(),
            topic: String::new(),
            key: key.to_string(),
            invite_only: false,
            topic_restricted: false,
            limit: None,
            members: BTreeSet::new(),
            operators: BTreeSet::new(),
            invites: BTreeSet::new(),
        }
    }

    pub fn is_member(&self, id: ConnectionId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_operator(&self, id: ConnectionId) -> bool {
        self.operators.contains(&id)
    }

    pub fn is_invited(&self, id: ConnectionId) -> bool {
        self.invites.contains(&id)
    }

    /// Check key, invite-only and limit, in that order.
    ///
    /// The supplied key must equal the stored one; an empty key only opens a
    /// keyless channel.
    pub fn admits(&self, id: ConnectionId, key: &str) -> Result<(), Response> {
        if self.key != key {
            return Err(Response::ERR_BADCHANNELKEY);
        }
        if self.invite_only && !self.is_invited(id) {
            return Err(Response::ERR_INVITEONLYCHAN);
        }
        if self.limit.is_some_and(|limit| self.members.len() >= limit) {
            return Err(Response::ERR_CHANNELISFULL);
        }
        Ok(())
    }

    pub fn add_member(&mut self, id: ConnectionId) {
        self.members.insert(id);
    }

    /// Remove a member together with its operator status.
    pub fn remove_member(&mut self, id: ConnectionId) -> bool {
        self.operators.remove(&id);
        self.members.remove(&id)
    }

    /// Grant operator status; only current members qualify.
    pub fn add_operator(&mut self, id: ConnectionId) -> bool {
        if !self.is_member(id) {
            return false;
        }
        self.operators.insert(id);
        true
    }

    pub fn remove_operator(&mut self, id: ConnectionId) -> bool {
        self.operators.remove(&id)
    }

    pub fn invite(&mut self, id: ConnectionId) {
        self.invites.insert(id);
    }

    /// Forget a departed session everywhere, invites included.
    pub fn forget(&mut self, id: ConnectionId) {
        self.remove_member(id);
        self.invites.remove(&id);
    }

    /// Members in connection order.
    pub fn members(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.members.iter().copied()
    }

    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members.iter().copied().collect()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Set flags as `+itk` (subset). Empty when nothing is set.
    ///
    /// The key is shown only as present, never by value.
    pub fn mode_string(&self) -> String {
        let mut flags = String::new();
        if self.invite_only {
            flags.push('i');
        }
        if self.topic_restricted {
            flags.push('t');
        }
        if !self.key.is_empty() {
            flags.push('k');
        }
        if flags.is_empty() {
            flags
        } else {
            format!("+{flags}")
        }
    }
}
