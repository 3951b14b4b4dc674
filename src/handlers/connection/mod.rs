//! Connection and registration handlers.
//!
//! Handles PASS, NICK, USER, PING and QUIT: the commands accepted before
//! registration completes.

mod nick;
mod pass;
mod ping;
mod user;

pub use nick::NickHandler;
pub use pass::PassHandler;
pub use ping::{PingHandler, QuitHandler};
pub use user::UserHandler;

use super::Context;
use crate::error::HandlerResult;
use ircserv_proto::Response;
use tracing::info;

/// Flip the session to registered if NICK and USER are both done.
///
/// Sends the single RPL_WELCOME on the transition.
fn complete_registration(ctx: &mut Context<'_>) -> HandlerResult {
    if !ctx.me_mut()?.try_register() {
        return Ok(());
    }
    let me = ctx.me()?;
    info!(conn = ctx.id, nick = %me.nick, user = %me.user, host = %me.host, "client registered");
    ctx.reply(Response::RPL_WELCOME, None)
}
