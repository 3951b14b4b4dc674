//! Channel registry: case-insensitive name → channel.
//!
//! The registry owns channel lifetime. A channel is inserted only once it has
//! a member and removed in the same operation that empties it.

use super::channel::Channel;
use ircserv_proto::{irc_to_lower, ConnectionId};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, Channel>,
}

impl ChannelRegistry {
    pub fn find(&self, name: &str) -> Option<&Channel> {
        self.channels.get(&irc_to_lower(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(&irc_to_lower(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(&irc_to_lower(name))
    }

    /// Create `name` with `creator` as sole member and operator.
    ///
    /// Returns `None` without inserting anything if the channel exists.
    pub fn create_and_join(&mut self, name: &str, key: &str, creator: ConnectionId) -> Option<&Channel> {
        let folded = irc_to_lower(name);
        if self.channels.contains_key(&folded) {
            return None;
        }
        let mut channel = Channel::new(name, key);
        channel.add_member(creator);
        channel.add_operator(creator);
        Some(self.channels.entry(folded).or_insert(channel))
    }

    /// Remove `name` if nobody is left in it. Returns whether it was removed.
    pub fn remove_if_empty(&mut self, name: &str) -> bool {
        let folded = irc_to_lower(name);
        if self.channels.get(&folded).is_some_and(Channel::is_empty) {
            self.channels.remove(&folded);
            return true;
        }
        false
    }

    /// Display names of every channel `id` belongs to.
    pub fn channels_of(&self, id: ConnectionId) -> Vec<String> {
        let mut names: Vec<String> = self
            .channels
            .values()
            .filter(|c| c.is_member(id))
            .map(|c| c.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Sessions sharing at least one channel with `id`, excluding `id`.
    pub fn peers_of(&self, id: ConnectionId) -> Vec<ConnectionId> {
        let mut peers: Vec<ConnectionId> = self
            .channels
            .values()
            .filter(|c| c.is_member(id))
            .flat_map(Channel::members)
            .filter(|&m| m != id)
            .collect();
        peers.sort_unstable();
        peers.dedup();
        peers
    }

    /// Drop every trace of `id` (membership, operator, invites) and delete
    /// channels that became empty. Returns the names of channels it left.
    pub fn forget(&mut self, id: ConnectionId) -> Vec<String> {
        let mut left = Vec::new();
        for channel in self.channels.values_mut() {
            if channel.is_member(id) {
                left.push(channel.name.clone());
            }
            channel.forget(id);
        }
        self.channels.retain(|_, c| !c.is_empty());
        left.sort();
        left
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let mut reg = ChannelRegistry::default();
        assert!(reg.create_and_join("#Rust", "", 1).is_some());
        assert_eq!(reg.find("#rust").map(|c| c.name.as_str()), Some("#Rust"));
        assert!(reg.contains("#RUST"));
    }

    #[test]
    fn creator_is_sole_operator() {
        let mut reg = ChannelRegistry::default();
        let chan = reg.create_and_join("#test", "key", 4).unwrap();
        assert!(chan.is_operator(4));
        assert_eq!(chan.member_count(), 1);
        assert_eq!(chan.operator_count(), 1);
        assert_eq!(chan.key, "key");
    }

    #[test]
    fn create_existing_is_refused() {
        let mut reg = ChannelRegistry::default();
        reg.create_and_join("#test", "", 1);
        assert!(reg.create_and_join("#TEST", "", 2).is_none());
        assert!(!reg.find("#test").unwrap().is_member(2));
    }

    #[test]
    fn empty_channels_are_removed() {
        let mut reg = ChannelRegistry::default();
        reg.create_and_join("#test", "", 1);
        assert!(!reg.remove_if_empty("#test"));
        reg.find_mut("#test").unwrap().remove_member(1);
        assert!(reg.remove_if_empty("#test"));
        assert!(reg.is_empty());
    }

    #[test]
    fn forget_leaves_everything() {
        let mut reg = ChannelRegistry::default();
        reg.create_and_join("#a", "", 1);
        reg.create_and_join("#b", "", 2);
        reg.find_mut("#b").unwrap().add_member(1);

        assert_eq!(reg.peers_of(1), vec![2]);
        assert_eq!(reg.forget(1), vec!["#a", "#b"]);
        assert!(reg.find("#a").is_none());
        assert_eq!(reg.find("#b").unwrap().member_ids(), vec![2]);
        assert_eq!(reg.channels_of(1), Vec::<String>::new());
    }
}
