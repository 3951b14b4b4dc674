//! Two-stage parsing of inbound IRC lines.
//!
//! [`Line::parse`] splits a raw line into prefix, command and the raw argument
//! string. Handlers then call [`parse_args`] with the shape they expect, which
//! lets a trailing field (realname, message text, topic) keep its spaces.

use std::fmt;

/// Characters stripped from the end of the argument string.
const TRAILING_JUNK: &[char] = &[' ', '\r', '\n', '\t', '\x0b', '\x0c', ':'];

/// A parsed line: `[:prefix] COMMAND arguments`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    /// Source prefix without the leading `:`, empty when absent.
    pub prefix: String,
    /// Command token, case preserved.
    pub command: String,
    /// Everything after the command, trimmed.
    pub arguments: String,
}

impl Line {
    /// Build a line from its parts.
    pub fn new(command: &str, arguments: &str) -> Self {
        Self {
            prefix: String::new(),
            command: command.to_string(),
            arguments: arguments.to_string(),
        }
    }

    /// Parse one raw line (without its CRLF).
    pub fn parse(raw: &str) -> Self {
        let mut rest = raw.trim_start();

        let mut prefix = "";
        if let Some(stripped) = rest.strip_prefix(':') {
            let (p, tail) = split_token(stripped);
            prefix = p;
            rest = tail;
        }

        let (command, tail) = split_token(rest.trim_start());

        Self {
            prefix: prefix.to_string(),
            command: command.trim_end_matches(TRAILING_JUNK).to_string(),
            arguments: tail.trim_start().trim_end_matches(TRAILING_JUNK).to_string(),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.prefix.is_empty() {
            write!(f, ":{} ", self.prefix)?;
        }
        f.write_str(&self.command)?;
        if !self.arguments.is_empty() {
            write!(f, " {}", self.arguments)?;
        }
        Ok(())
    }
}

/// Split at the first space: `(token, remainder after the space)`.
fn split_token(s: &str) -> (&str, &str) {
    match s.find(' ') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    }
}

/// Result of [`parse_args`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Leading whitespace-delimited tokens.
    pub args: Vec<String>,
    /// Trailing field, may contain spaces. Empty when absent.
    pub trailing: String,
}

impl ParsedArgs {
    /// Number of fields resolved: leading tokens plus a non-empty trailing.
    pub fn len(&self) -> usize {
        self.args.len() + usize::from(!self.trailing.is_empty())
    }

    /// Whether no field was resolved.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Leading token `idx`, or `""`.
    pub fn arg(&self, idx: usize) -> &str {
        self.args.get(idx).map_or("", String::as_str)
    }
}

/// Split an argument string into at most `n` logical fields.
///
/// Without `with_trailing`, up to `n` whitespace-delimited tokens are taken.
/// With `with_trailing`, up to `n - 1` tokens are taken and the rest becomes
/// one trailing field: everything after the first `:` of the remainder, or,
/// when there is no `:`, the next whitespace token.
///
/// ```
/// use ircserv_proto::parse_args;
///
/// let p = parse_args("#rust :hello there", 2, true);
/// assert_eq!(p.args, vec!["#rust"]);
/// assert_eq!(p.trailing, "hello there");
///
/// let p = parse_args("#a,#b key1,key2 extra", 2, false);
/// assert_eq!(p.args, vec!["#a,#b", "key1,key2"]);
/// ```
pub fn parse_args(arguments: &str, n: usize, with_trailing: bool) -> ParsedArgs {
    let limit = if with_trailing { n.saturating_sub(1) } else { n };
    let mut parsed = ParsedArgs::default();
    let mut rest = arguments;

    while parsed.args.len() < limit {
        let trimmed = rest.trim_start();
        if trimmed.is_empty() || trimmed.starts_with(':') {
            rest = trimmed;
            break;
        }
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        parsed.args.push(trimmed[..end].to_string());
        rest = &trimmed[end..];
    }

    if with_trailing {
        parsed.trailing = match rest.find(':') {
            Some(pos) => rest[pos + 1..].to_string(),
            None => rest.split_whitespace().next().unwrap_or("").to_string(),
        };
    }

    parsed
}

/// Split a comma-separated list, as used by JOIN and PART targets.
pub fn comma_split(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(',').map(str::to_string).collect()
}
