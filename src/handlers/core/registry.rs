//! Command handler registry and dispatch.
//!
//! The `Registry` is the protocol state machine: it decides, per line and per
//! session phase, whether a command is ignored, rejected or handled, and it
//! turns handler errors into numeric replies.

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{
    channel::{InviteHandler, JoinHandler, KickHandler, PartHandler, TopicHandler},
    connection::{NickHandler, PassHandler, PingHandler, QuitHandler, UserHandler},
    messaging::PrivmsgHandler,
    mode::ModeHandler,
    user_query::WhoisHandler,
};
use crate::state::Session;
use ircserv_proto::{Line, Response};
use std::collections::HashMap;
use tracing::{debug, error, info};

/// Commands dropped without any reply.
const SILENT: &[&str] = &["CAP", "WHO"];

/// Where a line goes.
pub enum Route<'r> {
    /// Drop silently.
    Ignore,
    /// Answer with a single numeric.
    Reject(Response),
    Handle(&'r dyn Handler),
}

/// Registry of command handlers.
pub struct Registry {
    /// Dispatched in any phase once past the ignore filter.
    handshake: HashMap<&'static str, Box<dyn Handler>>,
    /// Dispatched only to registered sessions.
    registered: HashMap<&'static str, Box<dyn Handler>>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut handshake: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();
        handshake.insert("PING", Box::new(PingHandler));
        handshake.insert("PASS", Box::new(PassHandler));
        handshake.insert("NICK", Box::new(NickHandler));
        handshake.insert("USER", Box::new(UserHandler));
        handshake.insert("MODE", Box::new(ModeHandler));
        handshake.insert("QUIT", Box::new(QuitHandler));

        let mut registered: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();
        registered.insert("INVITE", Box::new(InviteHandler));
        registered.insert("PRIVMSG", Box::new(PrivmsgHandler));
        registered.insert("JOIN", Box::new(JoinHandler));
        registered.insert("TOPIC", Box::new(TopicHandler));
        registered.insert("KICK", Box::new(KickHandler));
        registered.insert("PART", Box::new(PartHandler));
        registered.insert("WHOIS", Box::new(WhoisHandler));

        Self {
            handshake,
            registered,
        }
    }

    /// Gate a line against the session's phase.
    ///
    /// Command names match case-sensitively.
    pub fn route(&self, session: &Session, msg: &Line) -> Route<'_> {
        let cmd = msg.command.as_str();

        let ignored = cmd.is_empty()
            || (!session.authenticated && cmd != "QUIT" && cmd != "PASS")
            || (cmd == "MODE" && !msg.arguments.contains('#'))
            || SILENT.contains(&cmd);
        if ignored {
            return Route::Ignore;
        }

        if let Some(handler) = self.handshake.get(cmd) {
            return Route::Handle(handler.as_ref());
        }
        if !session.is_registered() {
            return Route::Reject(Response::ERR_NOTREGISTERED);
        }
        match self.registered.get(cmd) {
            Some(handler) => Route::Handle(handler.as_ref()),
            None => Route::Reject(Response::ERR_UNKNOWNCOMMAND),
        }
    }

    /// Dispatch a line and answer numeric errors.
    ///
    /// Only errors the connection layer must act on are returned: `Quit`,
    /// `Send` and `SessionMissing`.
    pub fn dispatch(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        let route = self.route(ctx.me()?, msg);
        let result = match route {
            Route::Ignore => {
                debug!(conn = ctx.id, command = %msg.command, "ignored");
                return Ok(());
            }
            Route::Reject(response) => Err(HandlerError::numeric(response)),
            Route::Handle(handler) => handler.handle(ctx, msg),
        };

        let result = match result {
            Err(HandlerError::Numeric { response, subject }) => ctx
                .reply(response, subject.as_deref())
                .map(|()| response.code()),
            Ok(()) => Ok(0),
            Err(e) => Err(e),
        };

        match result {
            Ok(code) => {
                log_command(ctx, msg, code);
                Ok(())
            }
            Err(e) => {
                log_command(ctx, msg, e.code());
                Err(e)
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn log_command(ctx: &Context<'_>, msg: &Line, code: u16) {
    let nick = ctx.matrix.nick_of(ctx.id).unwrap_or("*");
    let command = msg.command.as_str();
    if code > 400 {
        error!(conn = ctx.id, nick, command, code, args = %msg.arguments, "command failed");
    } else if command == "PING" || command == "PONG" {
        debug!(conn = ctx.id, nick, command, code, "command");
    } else {
        info!(conn = ctx.id, nick, command, code, "command");
    }
}
