//! MODE command handler.
//!
//! Channel modes only: `MODE <channel> [<flag> [<param>]]`. User-mode
//! requests never get here (the router drops MODE lines without a `#`).
//!
//! | flag      | effect                                 |
//! |-----------|----------------------------------------|
//! | `+i`/`-i` | invite-only on/off                     |
//! | `+t`      | topic restricted to operators          |
//! | `-t`      | toggles topic restriction              |
//! | `+k`/`-k` | set (needs a key) / clear the join key |
//! | `+l`/`-l` | set (needs a number) / lift the limit  |
//! | `+o`/`-o` | grant / revoke operator on a member    |

use super::{Context, Handler, HandlerError, HandlerResult};
use crate::state::Channel;
use ircserv_proto::{parse_args, ConnectionId, Line, Response};
use tracing::info;

/// Handler for MODE command.
pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Line) -> HandlerResult {
        let params = parse_args(&msg.arguments, 3, false);
        let (name, flag, param) = (params.arg(0), params.arg(1), params.arg(2));
        if name.is_empty() {
            return Err(HandlerError::numeric(Response::ERR_NEEDMOREPARAMS));
        }

        let id = ctx.id;
        let chan = ctx
            .matrix
            .channels
            .find(name)
            .ok_or_else(|| HandlerError::about(Response::ERR_NOSUCHCHANNEL, name))?;
        let chan_name = chan.name.clone();

        if flag.is_empty() {
            return ctx.reply_channel(Response::RPL_CHANNELMODEIS, &chan_name);
        }
        if !chan.is_operator(id) {
            return Err(HandlerError::about(Response::ERR_CHANOPRIVSNEEDED, chan_name));
        }

        let change = ModeChange::parse(flag, param)?;
        let subject = match change {
            ModeChange::Operator(_) => {
                let member = ctx
                    .matrix
                    .sessions
                    .find_by_nick(param)
                    .filter(|s| chan.is_member(s.id))
                    .ok_or_else(|| HandlerError::about(Response::ERR_NOSUCHNICK, param))?;
                Some(member.id)
            }
            _ => None,
        };

        let mask = ctx.me()?.mask();
        let Some(chan) = ctx.matrix.channels.find_mut(&chan_name) else {
            return Err(HandlerError::about(Response::ERR_NOSUCHCHANNEL, chan_name));
        };
        change.apply(chan, subject);
        let members = chan.member_ids();

        let line = if param.is_empty() || !change.takes_param() {
            format!(":{mask} MODE {chan_name} {flag}")
        } else {
            format!(":{mask} MODE {chan_name} {flag} {param}")
        };
        info!(conn = id, channel = %chan_name, mode = %flag, "mode change");
        ctx.broadcast(&members, &line);
        Ok(())
    }
}

/// One parsed flag with its parameter already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ModeChange {
    InviteOnly(bool),
    TopicRestricted,
    ToggleTopicRestricted,
    Key(Option<String>),
    Limit(Option<usize>),
    Operator(bool),
}

impl ModeChange {
    fn parse(flag: &str, param: &str) -> Result<Self, HandlerError> {
        let need_param = || HandlerError::numeric(Response::ERR_NEEDMOREPARAMS);
        Ok(match flag {
            "+i" => Self::InviteOnly(true),
            "-i" => Self::InviteOnly(false),
            "+t" => Self::TopicRestricted,
            "-t" => Self::ToggleTopicRestricted,
            "+k" if param.is_empty() => return Err(need_param()),
            "+k" => Self::Key(Some(param.to_string())),
            "-k" => Self::Key(None),
            "+l" => Self::Limit(Some(param.parse().map_err(|_| need_param())?)),
            "-l" => Self::Limit(None),
            "+o" | "-o" if param.is_empty() => return Err(need_param()),
            "+o" => Self::Operator(true),
            "-o" => Self::Operator(false),
            _ => return Err(HandlerError::about(Response::ERR_UNKNOWNMODE, flag)),
        })
    }

    fn takes_param(&self) -> bool {
        matches!(
            self,
            Self::Key(Some(_)) | Self::Limit(Some(_)) | Self::Operator(_)
        )
    }

    fn apply(&self, chan: &mut Channel, subject: Option<ConnectionId>) {
        match self {
            Self::InviteOnly(on) => chan.invite_only = *on,
            Self::TopicRestricted => chan.topic_restricted = true,
            Self::ToggleTopicRestricted => chan.topic_restricted = !chan.topic_restricted,
            Self::Key(key) => chan.key = key.clone().unwrap_or_default(),
            Self::Limit(limit) => chan.limit = *limit,
            Self::Operator(grant) => {
                if let Some(id) = subject {
                    if *grant {
                        chan.add_operator(id);
                    } else {
                        chan.remove_operator(id);
                    }
                }
            }
        }
    }
}
