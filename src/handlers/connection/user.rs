//! USER command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use super::complete_registration;
use ircserv_proto::{
    is_valid_hostname, is_valid_realname, is_valid_username, parse_args, Line, Response,
};
use tracing::debug;

/// Handler for USER command.
///
/// `USER username hostname servername :realname`
///
/// A username already taken by another session gets the smallest numeric
/// suffix that makes it unique.
pub struct UserHandler;

impl Handler for UserHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        if ctx.me()?.is_registered() {
            return Err(HandlerError::numeric(Response::ERR_ALREADYREGISTRED));
        }

        let fields = parse_args(&msg.arguments, 4, true);
        if fields.len() < 4 {
            return Err(HandlerError::numeric(Response::ERR_NEEDMOREPARAMS));
        }

        let username = ctx.matrix.sessions.unique_username(fields.arg(0), ctx.id);
        let (host, server, realname) = (fields.arg(1), fields.arg(2), fields.trailing.as_str());
        let valid = is_valid_username(&username)
            && is_valid_hostname(host)
            && is_valid_hostname(server)
            && is_valid_realname(realname);
        if !valid {
            return Err(HandlerError::numeric(Response::ERR_ERRONEUSUSER));
        }

        let id = ctx.id;
        let me = ctx.me_mut()?;
        me.user = username;
        me.host = host.to_string();
        me.server = server.to_string();
        me.realname = realname.to_string();
        me.user_set = true;
        debug!(conn = id, user = %me.user, host = %me.host, "USER accepted");

        ctx.reply(Response::RPL_WHOISUSER, None)?;
        complete_registration(ctx)
    }
}
