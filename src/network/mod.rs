//! Network module.
//!
//! Contains the Gateway (TCP listener and event loop), the socket-free
//! [`Server`] core it drives, and the outbound [`Transport`] seam.

mod gateway;
mod server;
mod transport;

pub use gateway::Gateway;
pub use server::Server;
pub use transport::{QueueTransport, Transport};

#[cfg(test)]
pub(crate) use transport::RecordingTransport;
