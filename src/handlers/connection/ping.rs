//! PING and QUIT handlers.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use ircserv_proto::{Line, Response};
use tracing::info;

/// Handler for PING command.
///
/// Only PINGs naming this server are answered.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        // PING <server>
        let origin = msg.arguments.strip_prefix(':').unwrap_or(&msg.arguments);
        if origin.is_empty() {
            return Err(HandlerError::numeric(Response::ERR_NOORIGIN));
        }
        if origin != ctx.server_name() {
            return Err(HandlerError::about(Response::ERR_NOSUCHSERVER, origin));
        }
        ctx.reply(Response::RPL_PONG, None)
    }
}

/// Handler for QUIT command.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        let me = ctx.me()?;
        let text = msg.arguments.strip_prefix(':').unwrap_or(&msg.arguments);
        let quit_msg = if text.is_empty() {
            format!("{} quit", me.nick)
        } else {
            text.to_string()
        };

        info!(conn = ctx.id, nick = %me.nick, message = %quit_msg, "Client quit");

        // Signal quit by returning Quit error that the server core will handle
        Err(HandlerError::Quit(quit_msg))
    }
}
