//! # ircserv-proto
//!
//! Protocol building blocks for the `ircserv` daemon:
//!
//! - [`LineCodec`]: CRLF line framing as a `tokio_util` codec
//! - [`Framer`]: per-connection reassembly of partial and batched reads
//! - [`Line`] and [`parse_args`]: the two-stage line parser
//! - [`Response`]: the numeric reply codes the server emits
//! - grammar checks for nicknames, channel names and `USER` fields
//!
//! ## Quick Start
//!
//! ```rust
//! use ircserv_proto::{Framer, Line, parse_args};
//!
//! let mut framer = Framer::new();
//! assert!(framer.feed(1, b"USER alice host se").unwrap().is_empty());
//!
//! let lines = framer.feed(1, b"rv :Alice A\r\n").unwrap();
//! let line = Line::parse(&lines[0]);
//! assert_eq!(line.command, "USER");
//!
//! let fields = parse_args(&line.arguments, 4, true);
//! assert_eq!(fields.len(), 4);
//! assert_eq!(fields.trailing, "Alice A");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod chan;
pub mod error;
pub mod framer;
pub mod ident;
pub mod line;
pub mod message;
pub mod nick;
pub mod response;

pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use self::chan::{is_channel_sigil, ChannelExt, MAX_CHANNEL_LEN};
pub use self::error::{ProtocolError, Result};
pub use self::framer::{ConnectionId, Framer, ReadEvent};
pub use self::ident::{is_valid_hostname, is_valid_realname, is_valid_username};
pub use self::line::{encode as encode_line, LineCodec, CRLF};
pub use self::message::{comma_split, parse_args, Line, ParsedArgs};
pub use self::nick::{NickExt, MAX_NICK_LEN};
pub use self::response::Response;

/// Conventional size of a single socket read (the IRC line limit).
pub const READ_CHUNK: usize = 512;
