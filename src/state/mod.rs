//! State management module.
//!
//! Contains the Matrix (server state): the session table and the channel
//! registry.

mod channel;
mod matrix;
mod registry;
mod session;

pub use channel::Channel;
pub use matrix::{Matrix, ServerInfo};
pub use registry::ChannelRegistry;
pub use session::{Phase, Session, SessionTable};
