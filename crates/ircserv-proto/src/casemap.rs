//! IRC case-mapping functions.
//!
//! Nicknames, usernames and channel names compare case-insensitively using
//! the `ascii` case mapping: only `A-Z` fold, so `[]\~` and `{}|^` stay
//! distinct.

/// Convert a single character to IRC lowercase (ASCII letters only).
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    c.to_ascii_lowercase()
}

/// Convert a string to IRC lowercase.
///
/// This is the key used by the channel registry and the nick index.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}

/// Compare two strings using IRC case-insensitive comparison.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
