//! Channel name utilities.
//!
//! # Reference
//! - RFC 2812 Section 1.3: Channel names

/// Maximum channel name length, sigil included.
pub const MAX_CHANNEL_LEN: usize = 50;

/// Whether `c` introduces a channel name (`#`, `&`, `+` or `!`).
#[inline]
pub fn is_channel_sigil(c: char) -> bool {
    matches!(c, '#' | '&' | '+' | '!')
}

/// Extension trait for checking if a string is a valid IRC channel name.
pub trait ChannelExt {
    /// Check if this string is a valid IRC channel name.
    ///
    /// Valid channel names:
    /// - Start with '#', '&', '+', or '!'
    /// - Do not contain whitespace, comma or BEL (0x07)
    /// - Are at most 50 bytes long
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for &str {
    fn is_channel_name(&self) -> bool {
        if self.is_empty() || self.len() > MAX_CHANNEL_LEN {
            return false;
        }

        let mut chars = self.chars();
        if !chars.next().is_some_and(is_channel_sigil) {
            return false;
        }

        chars.all(|c| c != ',' && c != '\x07' && !c.is_whitespace())
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}
