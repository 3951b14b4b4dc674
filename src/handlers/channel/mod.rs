//! Channel command handlers.
//!
//! Handles JOIN, PART, TOPIC, KICK and INVITE.

mod invite;
mod join;
mod kick;
mod ops;
mod part;
mod topic;

pub use invite::InviteHandler;
pub use join::JoinHandler;
pub use kick::KickHandler;
pub use part::PartHandler;
pub use topic::TopicHandler;
