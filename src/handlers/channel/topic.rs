//! TOPIC command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use ircserv_proto::{parse_args, Line, Response};
use tracing::info;

/// Handler for TOPIC command.
///
/// `TOPIC <channel> [:topic]`
///
/// Without a topic, replies with the current one. Setting it on a `+t`
/// channel takes channel operator status.
pub struct TopicHandler;

impl Handler for TopicHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        let params = parse_args(&msg.arguments, 2, true);
        let name = params.arg(0);
        if name.is_empty() {
            return Err(HandlerError::numeric(Response::ERR_NEEDMOREPARAMS));
        }

        let id = ctx.id;
        let chan = ctx
            .matrix
            .channels
            .find(name)
            .ok_or_else(|| HandlerError::about(Response::ERR_NOSUCHCHANNEL, name))?;

        if params.trailing.is_empty() {
            let chan_name = chan.name.clone();
            return ctx.reply_channel(Response::RPL_TOPIC, &chan_name);
        }

        if chan.topic_restricted && !chan.is_operator(id) {
            return Err(HandlerError::about(Response::ERR_CHANOPRIVSNEEDED, &chan.name));
        }

        let mask = ctx.me()?.mask();
        let Some(chan) = ctx.matrix.channels.find_mut(name) else {
            return Err(HandlerError::about(Response::ERR_NOSUCHCHANNEL, name));
        };
        chan.topic = params.trailing.clone();
        let line = format!(":{mask} TOPIC {} :{}", chan.name, chan.topic);
        let members = chan.member_ids();
        info!(conn = id, channel = %chan.name, topic = %chan.topic, "topic set");

        ctx.broadcast(&members, &line);
        Ok(())
    }
}
