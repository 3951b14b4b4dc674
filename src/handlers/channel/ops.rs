//! Membership operations shared by JOIN, PART, KICK and `JOIN 0`.

use super::super::{Context, HandlerError, HandlerResult};
use ircserv_proto::{ConnectionId, Response};
use tracing::debug;

/// Announce that `joiner` is in `channel` to the full membership, then send
/// the joiner the topic, names and end-of-names replies.
pub(super) fn announce_join(ctx: &mut Context<'_>, joiner: ConnectionId, channel: &str) -> HandlerResult {
    let mask = ctx
        .matrix
        .sessions
        .get(joiner)
        .map(|s| s.mask())
        .ok_or(HandlerError::SessionMissing(joiner))?;
    let (name, members) = match ctx.matrix.channels.find(channel) {
        Some(chan) => (chan.name.clone(), chan.member_ids()),
        None => return Err(HandlerError::about(Response::ERR_NOSUCHCHANNEL, channel)),
    };

    ctx.broadcast(&members, &format!(":{mask} JOIN {name}"));

    ctx.reply_channel(Response::RPL_TOPIC, &name)?;
    ctx.reply_channel(Response::RPL_NAMREPLY, &name)?;
    ctx.reply_channel(Response::RPL_ENDOFNAMES, &name)
}

/// Remove `member` from `channel`, announcing the PART with `message` to the
/// membership as it was before the departure. Deletes the channel if it
/// ends up empty.
pub(super) fn part_channel(
    ctx: &mut Context<'_>,
    member: ConnectionId,
    channel: &str,
    message: &str,
) -> HandlerResult {
    let mask = ctx
        .matrix
        .sessions
        .get(member)
        .map(|s| s.mask())
        .ok_or(HandlerError::SessionMissing(member))?;
    let chan = ctx
        .matrix
        .channels
        .find(channel)
        .ok_or_else(|| HandlerError::about(Response::ERR_NOSUCHCHANNEL, channel))?;
    if !chan.is_member(member) {
        return Err(HandlerError::about(Response::ERR_NOTONCHANNEL, channel));
    }
    let name = chan.name.clone();
    let audience = chan.member_ids();

    ctx.broadcast(&audience, &format!(":{mask} PART {name} :{message}"));

    if let Some(chan) = ctx.matrix.channels.find_mut(&name) {
        chan.remove_member(member);
    }
    if ctx.matrix.channels.remove_if_empty(&name) {
        debug!(channel = %name, "channel removed");
    }
    Ok(())
}

/// Leave every channel (`JOIN 0`).
pub(super) fn part_all(ctx: &mut Context<'_>, message: &str) -> HandlerResult {
    let id = ctx.id;
    for name in ctx.matrix.channels.channels_of(id) {
        part_channel(ctx, id, &name, message)?;
    }
    Ok(())
}
