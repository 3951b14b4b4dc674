//! PASS command handler for connection registration.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use ircserv_proto::{Line, Response};
use tracing::{debug, warn};

/// Handler for PASS command.
///
/// `PASS password`
///
/// Compares the argument verbatim with the launch password. Nothing else is
/// accepted until it matches.
pub struct PassHandler;

impl Handler for PassHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        let password = msg.arguments.strip_prefix(':').unwrap_or(&msg.arguments);
        if password.is_empty() {
            return Err(HandlerError::numeric(Response::ERR_NEEDMOREPARAMS));
        }

        if password != ctx.matrix.server_info.password {
            warn!(conn = ctx.id, "password mismatch");
            return Err(HandlerError::numeric(Response::ERR_PASSWDMISMATCH));
        }

        let me = ctx.me_mut()?;
        if me.authenticated {
            return Err(HandlerError::numeric(Response::ERR_ALREADYREGISTRED));
        }
        me.authenticated = true;
        debug!(conn = ctx.id, "PASS accepted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::Harness;

    #[test]
    fn empty_password() {
        let mut h = Harness::new();
        let id = h.connect();
        h.send(id, "PASS");
        assert_eq!(h.take(id), vec![":IRCS 461 User1 PASS :Not enough parameters"]);
    }

    #[test]
    fn wrong_password() {
        let mut h = Harness::new();
        let id = h.connect();
        h.send(id, "PASS nope");
        assert_eq!(h.take(id), vec![":IRCS 464 User1 :Password incorrect"]);
        assert!(!h.session(id).authenticated);
    }

    #[test]
    fn accepts_trailing_form() {
        let mut h = Harness::new();
        let id = h.connect();
        h.send(id, "PASS :s3cr3t");
        assert!(h.take(id).is_empty());
        assert!(h.session(id).authenticated);
    }

    #[test]
    fn whole_argument_must_match() {
        let mut h = Harness::new();
        let id = h.connect();
        h.send(id, "PASS s3cr3t garbage");
        assert_eq!(h.take(id), vec![":IRCS 464 User1 :Password incorrect"]);
        assert!(!h.session(id).authenticated);
        h.send(id, "PASS ::s3cr3t");
        assert!(!h.session(id).authenticated);
    }

    #[test]
    fn second_pass_is_refused() {
        let mut h = Harness::new();
        let id = h.connect();
        h.send(id, "PASS s3cr3t");
        h.send(id, "PASS s3cr3t");
        assert_eq!(
            h.take(id),
            vec![":IRCS 462 User1 :Unauthorized command (already registered)"]
        );
    }
}
