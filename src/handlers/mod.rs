//! IRC command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! parsed lines to the appropriate handler. Handlers are synchronous: they run
//! on the event loop, mutate the [`Matrix`](crate::state::Matrix) directly and
//! queue their output through the context.

mod channel;
mod connection;
pub mod core;
mod messaging;
mod mode;
mod user_query;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::core::{Context, Handler, Registry, Route};
pub use crate::error::{HandlerError, HandlerResult};

pub use channel::{InviteHandler, JoinHandler, KickHandler, PartHandler, TopicHandler};
pub use connection::{NickHandler, PassHandler, PingHandler, QuitHandler, UserHandler};
pub use messaging::PrivmsgHandler;
pub use mode::ModeHandler;
pub use user_query::WhoisHandler;
