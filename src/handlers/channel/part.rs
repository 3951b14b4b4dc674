//! PART command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use super::ops::part_channel;
use ircserv_proto::{comma_split, parse_args, Line, Response};

/// Handler for PART command.
///
/// `PART <chan1,chan2,...> [:message]`
pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        let params = parse_args(&msg.arguments, 2, true);
        if params.arg(0).is_empty() {
            return Err(HandlerError::numeric(Response::ERR_NEEDMOREPARAMS));
        }

        let message = if params.trailing.is_empty() {
            format!("{} left", ctx.me()?.nick)
        } else {
            params.trailing.clone()
        };

        let id = ctx.id;
        for name in comma_split(params.arg(0)) {
            if name.is_empty() {
                continue;
            }
            part_channel(ctx, id, &name, &message)?;
        }
        Ok(())
    }
}
