//! ircserv - a single-server IRC daemon.
//!
//! One event loop owns all protocol state; per-connection tasks only move
//! bytes. See [`network::Gateway`] for the runtime and [`handlers`] for the
//! command set.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod reply;
pub mod state;
