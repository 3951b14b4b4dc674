//! JOIN command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use super::ops::{announce_join, part_all};
use ircserv_proto::{comma_split, parse_args, ChannelExt, Line, Response};
use tracing::{debug, info};

/// Handler for JOIN command.
///
/// `JOIN <chan1,chan2,...> [<key1,key2,...>]` or `JOIN 0`
///
/// Channels are joined in order; the first failure stops the rest and is
/// reported against that channel.
pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        let params = parse_args(&msg.arguments, 2, false);
        if params.is_empty() {
            return Err(HandlerError::numeric(Response::ERR_NEEDMOREPARAMS));
        }

        if params.arg(0) == "0" {
            let message = format!("{} left", ctx.me()?.nick);
            return part_all(ctx, &message);
        }

        let channels = comma_split(params.arg(0));
        let keys = comma_split(params.arg(1));
        if keys.len() > channels.len() {
            return Err(HandlerError::numeric(Response::ERR_NEEDMOREPARAMS));
        }

        for (idx, name) in channels.iter().enumerate() {
            let key = keys.get(idx).map_or("", String::as_str);
            join_one(ctx, name, key)?;
        }
        Ok(())
    }
}

fn join_one(ctx: &mut Context<'_>, name: &str, key: &str) -> HandlerResult {
    if !name.is_channel_name() {
        return Err(HandlerError::about(Response::ERR_BADCHANMASK, name));
    }

    let id = ctx.id;
    match ctx.matrix.channels.find_mut(name) {
        None => {
            ctx.matrix.channels.create_and_join(name, key, id);
            info!(conn = id, channel = %name, "channel created");
        }
        Some(chan) if chan.is_member(id) => {
            debug!(conn = id, channel = %chan.name, "already joined");
            return Ok(());
        }
        Some(chan) => {
            chan.admits(id, key)
                .map_err(|response| HandlerError::about(response, name))?;
            chan.add_member(id);
        }
    }

    announce_join(ctx, id, name)
}
