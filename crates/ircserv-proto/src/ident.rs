//! Grammar checks for the fields of the `USER` command.
//!
//! `USER <username> <hostname> <servername> :<realname>`

use regex::Regex;
use std::sync::OnceLock;

/// Longest accepted hostname or servername.
const MAX_HOST_LEN: usize = 255;

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]{1,10}$").expect("username pattern"))
}

fn hostname_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]+)*$")
            .expect("hostname pattern")
    })
}

fn realname_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\x20-\x7E]{1,50}$").expect("realname pattern"))
}

/// One to ten characters, no whitespace and no `@`.
pub fn is_valid_username(username: &str) -> bool {
    username_re().is_match(username)
}

/// A DNS-style host label sequence, or the RFC 2812 placeholder `*`.
///
/// Used for both the hostname and the servername field.
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname == "*" {
        return true;
    }
    !hostname.is_empty() && hostname.len() <= MAX_HOST_LEN && hostname_re().is_match(hostname)
}

/// One to fifty printable ASCII characters.
pub fn is_valid_realname(realname: &str) -> bool {
    realname_re().is_match(realname)
}
