//! Core handler infrastructure.
//!
//! The handler registry (the command-gating state machine) and the context
//! passed to every handler.

pub mod context;
pub mod registry;

pub use context::{Context, Handler};
pub use registry::{Registry, Route};
