//! KICK command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use super::ops::part_channel;
use ircserv_proto::{parse_args, Line, Response};
use tracing::info;

/// Handler for KICK command.
///
/// `KICK <channel> <nick> [:reason]`
///
/// The target is parted from the channel with the message
/// `<nick> was kicked by <kicker>`.
pub struct KickHandler;

impl Handler for KickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        let params = parse_args(&msg.arguments, 3, true);
        let (name, target) = (params.arg(0), params.arg(1));
        if name.is_empty() || target.is_empty() {
            return Err(HandlerError::numeric(Response::ERR_NEEDMOREPARAMS));
        }

        let chan = ctx
            .matrix
            .channels
            .find(name)
            .ok_or_else(|| HandlerError::about(Response::ERR_NOSUCHCHANNEL, name))?;
        if !chan.is_operator(ctx.id) {
            return Err(HandlerError::about(Response::ERR_CHANOPRIVSNEEDED, &chan.name));
        }

        let victim = ctx
            .matrix
            .sessions
            .find_by_nick(target)
            .filter(|s| chan.is_member(s.id))
            .ok_or_else(|| HandlerError::about(Response::ERR_NOSUCHNICK, target))?;
        let (victim_id, victim_nick) = (victim.id, victim.nick.clone());
        let chan_name = chan.name.clone();

        let kicker = ctx.me()?.nick.clone();
        let mut message = format!("{victim_nick} was kicked by {kicker}");
        if !params.trailing.is_empty() {
            message = format!("{message} ({})", params.trailing);
        }

        info!(conn = ctx.id, channel = %chan_name, target = %victim_nick, "kick");
        part_channel(ctx, victim_id, &chan_name, &message)
    }
}
