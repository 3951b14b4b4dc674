//! NICK command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use super::complete_registration;
use ircserv_proto::{Line, NickExt, Response};
use tracing::info;

/// Handler for NICK command.
///
/// `NICK nickname`
///
/// Sets the first nickname during registration or changes it later. A change
/// is announced to the session and to everyone sharing a channel with it.
pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        let nick = msg.arguments.strip_prefix(':').unwrap_or(&msg.arguments).to_string();
        if nick.is_empty() {
            return Err(HandlerError::numeric(Response::ERR_NONICKNAMEGIVEN));
        }

        if ctx.matrix.sessions.nick_in_use(&nick, ctx.id) {
            return Err(HandlerError::about(Response::ERR_NICKNAMEINUSE, nick));
        }
        if !nick.is_valid_nick() {
            return Err(HandlerError::about(Response::ERR_ERRONEUSNICKNAME, nick));
        }

        let me = ctx.me()?;
        let changing = me.nick_set;
        let old_mask = me.mask();

        ctx.matrix.sessions.set_nick(ctx.id, &nick);

        if changing {
            info!(conn = ctx.id, old = %old_mask, new = %nick, "nick changed");
            let notice = format!(":{old_mask} NICK :{nick}");
            let mut audience = vec![ctx.id];
            audience.extend(ctx.matrix.channels.peers_of(ctx.id));
            ctx.broadcast(&audience, &notice);
        } else {
            ctx.reply(Response::RPL_WHOISUSER, Some(&nick))?;
        }

        complete_registration(ctx)
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::Harness;

    #[test]
    fn first_nick_gets_identity_reply() {
        let mut h = Harness::new();
        let id = h.authed();
        h.send(id, "NICK alice");
        assert_eq!(h.take(id), vec![":IRCS 311 alice alice"]);
        assert_eq!(h.session(id).nick, "alice");
    }

    #[test]
    fn no_nickname_given() {
        let mut h = Harness::new();
        let id = h.authed();
        h.send(id, "NICK");
        assert_eq!(h.take(id), vec![":IRCS 431 User1 :No nickname given"]);
    }

    #[test]
    fn erroneous_nickname() {
        let mut h = Harness::new();
        let id = h.authed();
        for bad in ["1abc", "toolongnick", "a.b"] {
            h.send(id, &format!("NICK {bad}"));
            assert_eq!(
                h.take(id),
                vec![format!(":IRCS 432 User1 {bad} :Erroneous nickname")]
            );
        }
        assert!(!h.session(id).nick_set);
    }

    #[test]
    fn nick_with_extra_words_is_erroneous() {
        let mut h = Harness::new();
        let id = h.authed();
        h.send(id, "NICK al ice");
        assert_eq!(h.take(id), vec![":IRCS 432 User1 al ice :Erroneous nickname"]);
        assert!(!h.session(id).nick_set);
        h.send(id, "NICK :alice");
        assert_eq!(h.session(id).nick, "alice");
    }

    #[test]
    fn nick_in_use_is_case_insensitive_and_keeps_old_nick() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        h.send(bob, "NICK ALICE");
        assert_eq!(
            h.take(bob),
            vec![":IRCS 433 bob ALICE :Nickname is already in use"]
        );
        assert_eq!(h.session(bob).nick, "bob");
        assert_eq!(h.session(alice).nick, "alice");
    }

    #[test]
    fn change_is_announced_to_self_and_channel_peers() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        let carol = h.register("carol");
        h.send(alice, "JOIN #rust");
        h.send(bob, "JOIN #rust");
        h.clear();

        h.send(alice, "NICK alicia");
        assert_eq!(h.take(alice), vec![":alice!alice@host NICK :alicia"]);
        assert_eq!(h.take(bob), vec![":alice!alice@host NICK :alicia"]);
        assert!(h.take(carol).is_empty());
    }

    #[test]
    fn case_change_of_own_nick_is_allowed() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        h.send(alice, "NICK Alice");
        assert_eq!(h.take(alice), vec![":alice!alice@host NICK :Alice"]);
    }

    #[test]
    fn nick_after_user_registers() {
        let mut h = Harness::new();
        let id = h.authed();
        h.send(id, "USER alice host serv :Alice A");
        h.clear();
        h.send(id, "NICK alice");
        assert_eq!(
            h.take(id),
            vec![
                ":IRCS 311 alice alice".to_string(),
                ":IRCS 001 alice :Welcome to the Internet Relay Network alice!alice@host"
                    .to_string(),
            ]
        );
        assert!(h.session(id).is_registered());
    }
}
