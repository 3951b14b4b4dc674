//! Nickname validation utilities.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format (nickname definition)

/// Maximum nickname length per RFC 2812.
pub const MAX_NICK_LEN: usize = 9;

/// Extension trait for checking if a string is a valid IRC nickname.
pub trait NickExt {
    /// Check if this string is a valid IRC nickname per RFC 2812.
    ///
    /// - First character: letter (a-z, A-Z) or special character `[\]^_`{|}`
    /// - Subsequent characters: letter, digit (0-9), special, or hyphen (-)
    /// - Maximum length: 9 characters
    ///
    /// # Examples
    ///
    /// ```
    /// use ircserv_proto::NickExt;
    ///
    /// assert!("alice".is_valid_nick());
    /// assert!("[cool]".is_valid_nick());
    ///
    /// assert!(!"123nick".is_valid_nick());
    /// assert!(!"toolongnick".is_valid_nick());
    /// ```
    fn is_valid_nick(&self) -> bool;
}

/// `[ ] \ ` ^ _ { | }`
#[inline]
fn is_special(c: char) -> bool {
    matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
}

impl NickExt for &str {
    fn is_valid_nick(&self) -> bool {
        if self.is_empty() || self.len() > MAX_NICK_LEN {
            return false;
        }

        let mut chars = self.chars();
        let first_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || is_special(c));

        first_ok && chars.all(|c| c.is_ascii_alphanumeric() || is_special(c) || c == '-')
    }
}

impl NickExt for String {
    fn is_valid_nick(&self) -> bool {
        self.as_str().is_valid_nick()
    }
}
