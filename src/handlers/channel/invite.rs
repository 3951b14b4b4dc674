//! INVITE command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use ircserv_proto::{parse_args, Line, Response};
use tracing::info;

/// Handler for INVITE command.
///
/// `INVITE <nick> <channel>`
///
/// Invites stay recorded after the target joins.
pub struct InviteHandler;

impl Handler for InviteHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        let params = parse_args(&msg.arguments, 2, false);
        let (target, name) = (params.arg(0), params.arg(1));
        if target.is_empty() || name.is_empty() {
            return Err(HandlerError::numeric(Response::ERR_NEEDMOREPARAMS));
        }

        let id = ctx.id;
        let chan = ctx
            .matrix
            .channels
            .find(name)
            .ok_or_else(|| HandlerError::about(Response::ERR_NOSUCHCHANNEL, name))?;
        if !chan.is_operator(id) {
            return Err(HandlerError::about(Response::ERR_CHANOPRIVSNEEDED, &chan.name));
        }
        let invitee = ctx
            .matrix
            .sessions
            .find_by_nick(target)
            .ok_or_else(|| HandlerError::about(Response::ERR_NOSUCHNICK, target))?;
        if !chan.is_member(id) {
            return Err(HandlerError::about(Response::ERR_NOTONCHANNEL, &chan.name));
        }
        if chan.is_member(invitee.id) {
            return Err(HandlerError::about(
                Response::ERR_USERONCHANNEL,
                format!("{} {}", invitee.nick, chan.name),
            ));
        }

        let (invitee_id, invitee_nick) = (invitee.id, invitee.nick.clone());
        let chan_name = chan.name.clone();
        if let Some(chan) = ctx.matrix.channels.find_mut(name) {
            chan.invite(invitee_id);
        }
        info!(conn = id, channel = %chan_name, target = %invitee_nick, "invite");

        let mask = ctx.me()?.mask();
        ctx.reply(Response::RPL_INVITING, Some(&format!("{invitee_nick} {chan_name}")))?;
        let _ = ctx.send_to(invitee_id, &format!(":{mask} INVITE {invitee_nick} :{chan_name}"));
        Ok(())
    }
}
