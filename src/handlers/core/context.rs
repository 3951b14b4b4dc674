//! Command handler context and core types.
//!
//! Defines the `Context<'a>` struct passed to all handlers and the `Handler`
//! trait they implement.

use crate::error::{HandlerError, HandlerResult, SendError};
use crate::network::Transport;
use crate::reply::{self, Echo};
use crate::state::{Matrix, Session};
use ircserv_proto::{ConnectionId, Line, Response};
use tracing::debug;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The acting connection.
    pub id: ConnectionId,
    /// Server state.
    pub matrix: &'a mut Matrix,
    /// Outbound delivery.
    pub transport: &'a mut dyn Transport,
    /// Peers whose delivery failed during this event; disconnected afterwards.
    pub failed: &'a mut Vec<ConnectionId>,
    /// The line being handled, echoed by some reply templates.
    pub line: &'a Line,
}

impl<'a> Context<'a> {
    pub fn new(
        id: ConnectionId,
        matrix: &'a mut Matrix,
        transport: &'a mut dyn Transport,
        failed: &'a mut Vec<ConnectionId>,
        line: &'a Line,
    ) -> Self {
        Self {
            id,
            matrix,
            transport,
            failed,
            line,
        }
    }

    /// The acting session.
    pub fn me(&self) -> Result<&Session, HandlerError> {
        self.matrix
            .sessions
            .get(self.id)
            .ok_or(HandlerError::SessionMissing(self.id))
    }

    pub fn me_mut(&mut self) -> Result<&mut Session, HandlerError> {
        self.matrix
            .sessions
            .get_mut(self.id)
            .ok_or(HandlerError::SessionMissing(self.id))
    }

    pub fn server_name(&self) -> &str {
        &self.matrix.server_info.name
    }

    /// Queue `line` for `to`. A failure marks `to` for disconnect.
    pub fn send_to(&mut self, to: ConnectionId, line: &str) -> Result<(), SendError> {
        self.transport.send(to, line).inspect_err(|e| {
            debug!(conn = to, error = %e, "send failed");
            if !self.failed.contains(&to) {
                self.failed.push(to);
            }
        })
    }

    /// Queue `line` for the acting session.
    pub fn send(&mut self, line: &str) -> Result<(), SendError> {
        self.send_to(self.id, line)
    }

    /// Queue `line` for every id in `to`, carrying on past failures.
    pub fn broadcast(&mut self, to: &[ConnectionId], line: &str) {
        for &id in to {
            let _ = self.send_to(id, line);
        }
    }

    /// Send a numeric reply to the acting session.
    ///
    /// `subject` replaces the command arguments in the template.
    pub fn reply(&mut self, response: Response, subject: Option<&str>) -> HandlerResult {
        let me = self.me()?;
        let echo = Echo {
            command: &self.line.command,
            arguments: subject.unwrap_or(&self.line.arguments),
        };
        let line = reply::numeric(&self.matrix.server_info.name, response, me, echo);
        self.send(&line)?;
        Ok(())
    }

    /// Send a channel-scoped numeric (topic, names, modes) about `channel`.
    pub fn reply_channel(&mut self, response: Response, channel: &str) -> HandlerResult {
        let me = self.me()?;
        let chan = self
            .matrix
            .channels
            .find(channel)
            .ok_or_else(|| HandlerError::about(Response::ERR_NOSUCHCHANNEL, channel))?;
        let line = reply::channel_numeric(
            &self.matrix.server_info.name,
            response,
            me,
            chan,
            &self.matrix.sessions,
        );
        self.send(&line)?;
        Ok(())
    }
}

/// Trait implemented by all command handlers.
pub trait Handler: Send + Sync {
    /// Handle one parsed line.
    ///
    /// `Ok(())` means every reply was already sent; a
    /// [`HandlerError::Numeric`] is answered by the router.
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult;
}
