//! User query handlers.

use super::{Context, Handler, HandlerError, HandlerResult};
use ircserv_proto::{parse_args, Line, Response};

/// Handler for WHOIS command.
///
/// `WHOIS <nick>`
pub struct WhoisHandler;

impl Handler for WhoisHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        let params = parse_args(&msg.arguments, 1, false);
        let nick = params.arg(0);
        if nick.is_empty() {
            return Err(HandlerError::numeric(Response::ERR_NONICKNAMEGIVEN));
        }

        let target = ctx
            .matrix
            .sessions
            .find_by_nick(nick)
            .ok_or_else(|| HandlerError::about(Response::ERR_NOSUCHNICK, nick))?;
        let whois = format!(
            "{} {} {} * :{}",
            target.nick, target.user, target.host, target.realname
        );
        let target_nick = target.nick.clone();

        ctx.reply(Response::RPL_WHOISUSER, Some(&whois))?;
        ctx.reply(Response::RPL_ENDOFWHOIS, Some(&target_nick))
    }
}
