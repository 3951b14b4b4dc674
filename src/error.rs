//! Unified error handling for ircserv.
//!
//! Protocol errors never leave the connection they came from: handlers report
//! them as [`HandlerError::Numeric`] and the router turns that into exactly one
//! numeric reply. Transport failures are scoped to the peer they hit.

use ircserv_proto::{ConnectionId, Response};
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Answer the acting session with one generic numeric reply.
    ///
    /// `subject` replaces the command arguments in the reply template.
    #[error("numeric {response}")]
    Numeric {
        response: Response,
        subject: Option<String>,
    },

    /// A write to some peer failed; that peer is scheduled for disconnect.
    #[error("send error: {0}")]
    Send(#[from] SendError),

    /// The session asked to leave.
    #[error("client quit: {0}")]
    Quit(String),

    /// The acting session vanished mid-dispatch.
    #[error("internal error: no session for connection {0}")]
    SessionMissing(ConnectionId),
}

impl HandlerError {
    /// Reply with `response`, rendering the original arguments.
    pub fn numeric(response: Response) -> Self {
        Self::Numeric {
            response,
            subject: None,
        }
    }

    /// Reply with `response` about `subject` (a channel or nick).
    pub fn about(response: Response, subject: impl Into<String>) -> Self {
        Self::Numeric {
            response,
            subject: Some(subject.into()),
        }
    }

    /// Numeric code for logging; 0 for errors that have none.
    pub fn code(&self) -> u16 {
        match self {
            Self::Numeric { response, .. } => response.code(),
            _ => 0,
        }
    }

    /// Get a static error code string for log labeling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Numeric { .. } => "numeric",
            Self::Send(_) => "send_error",
            Self::Quit(_) => "quit",
            Self::SessionMissing(_) => "session_missing",
        }
    }
}

impl From<Response> for HandlerError {
    fn from(response: Response) -> Self {
        Self::numeric(response)
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Transport Errors
// ============================================================================

/// Why a line could not be handed to a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendFailure {
    /// The peer's outbound queue is full (stalled reader).
    QueueFull,
    /// The peer's writer is gone.
    Closed,
}

/// A failed write to one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("connection {id}: {failure:?}")]
pub struct SendError {
    pub id: ConnectionId,
    pub failure: SendFailure,
}
