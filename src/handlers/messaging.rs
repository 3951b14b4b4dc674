//! Messaging handlers.
//!
//! Handles PRIVMSG for a single nick or channel target.

use super::{Context, Handler, HandlerError, HandlerResult};
use ircserv_proto::{is_channel_sigil, parse_args, Line, Response};
use tracing::debug;

/// Handler for PRIVMSG command.
///
/// `PRIVMSG <target> :<text>`
///
/// Lists of targets are refused with ERR_TOOMANYTARGETS.
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        if msg.arguments.is_empty() {
            return Err(HandlerError::numeric(Response::ERR_NORECIPIENT));
        }
        let params = parse_args(&msg.arguments, 2, true);
        if params.len() < 2 {
            return Err(HandlerError::numeric(Response::ERR_NOTEXTTOSEND));
        }

        let target = params.arg(0);
        let text = params.trailing.as_str();
        if target.contains(',') {
            return Err(HandlerError::about(Response::ERR_TOOMANYTARGETS, target));
        }

        if target.starts_with(is_channel_sigil) {
            to_channel(ctx, target, text)
        } else {
            to_nick(ctx, target, text)
        }
    }
}

fn to_nick(ctx: &mut Context<'_>, target: &str, text: &str) -> HandlerResult {
    let nick = target.split('!').next().unwrap_or(target);
    let recipient = ctx
        .matrix
        .sessions
        .find_by_nick(nick)
        .ok_or_else(|| HandlerError::about(Response::ERR_NOSUCHNICK, nick))?;
    if text.is_empty() {
        return Err(HandlerError::numeric(Response::ERR_NOTEXTTOSEND));
    }

    let (to, to_nick) = (recipient.id, recipient.nick.clone());
    let line = format!(":{} PRIVMSG {to_nick} :{text}", ctx.me()?.mask());
    ctx.send_to(to, &line)?;
    Ok(())
}

/// Relay to every member but the sender, stopping at the first failed send.
fn to_channel(ctx: &mut Context<'_>, target: &str, text: &str) -> HandlerResult {
    let id = ctx.id;
    let chan = ctx
        .matrix
        .channels
        .find(target)
        .ok_or_else(|| HandlerError::about(Response::ERR_NOSUCHNICK, target))?;
    if !chan.is_member(id) {
        return Err(HandlerError::about(Response::ERR_NOTONCHANNEL, &chan.name));
    }

    let line = format!(":{} PRIVMSG {} :{text}", ctx.me()?.mask(), chan.name);
    let recipients: Vec<_> = chan.members().filter(|&m| m != id).collect();
    debug!(conn = id, channel = %chan.name, recipients = recipients.len(), "channel message");

    for to in recipients {
        ctx.send_to(to, &line)?;
    }
    Ok(())
}
