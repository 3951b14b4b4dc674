//! Numeric reply encoder.
//!
//! The single place where generic reply text is produced:
//! `:<server> <code> <nick> <payload>`. Lines are returned without CRLF; the
//! writer's codec appends it.

use crate::state::{Channel, Session, SessionTable};
use ircserv_proto::Response;

/// What the acting session sent, for templates that echo it.
#[derive(Debug, Clone, Copy)]
pub struct Echo<'a> {
    pub command: &'a str,
    /// The command arguments, or a subject (channel, nick) replacing them.
    pub arguments: &'a str,
}

/// Encode a numeric reply addressed to `to`.
pub fn numeric(server: &str, response: Response, to: &Session, echo: Echo<'_>) -> String {
    if response == Response::RPL_PONG {
        return format!(":{server} PONG {server}");
    }
    format!(":{server} {response} {} {}", to.nick, payload(response, to, echo))
}

/// Encode a channel-scoped reply (topic, names, end of names, modes).
pub fn channel_numeric(
    server: &str,
    response: Response,
    to: &Session,
    channel: &Channel,
    sessions: &SessionTable,
) -> String {
    let name = &channel.name;
    let payload = match response {
        Response::RPL_TOPIC => format!("{name} :{}", channel.topic),
        Response::RPL_NAMREPLY => format!("= {name} :{}", names(channel, sessions)),
        Response::RPL_ENDOFNAMES => format!("{name} :End of /NAMES list."),
        Response::RPL_CHANNELMODEIS => {
            let modes = channel.mode_string();
            if modes.is_empty() {
                name.clone()
            } else {
                format!("{name} {modes}")
            }
        }
        other => payload(
            other,
            to,
            Echo {
                command: "",
                arguments: name,
            },
        ),
    };
    format!(":{server} {response} {} {payload}", to.nick)
}

/// Space-separated member nicknames, operators prefixed with `@`.
fn names(channel: &Channel, sessions: &SessionTable) -> String {
    channel
        .members()
        .filter_map(|id| {
            let nick = &sessions.get(id)?.nick;
            Some(if channel.is_operator(id) {
                format!("@{nick}")
            } else {
                nick.clone()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn payload(response: Response, to: &Session, echo: Echo<'_>) -> String {
    let Echo { command, arguments } = echo;
    let with = |text: &str| format!("{arguments} :{text}");

    match response {
        Response::RPL_WELCOME => format!(
            ":Welcome to the Internet Relay Network {}!{}@{}",
            to.nick, to.user, to.host
        ),
        Response::RPL_WHOISUSER | Response::RPL_INVITING => arguments.to_string(),
        Response::RPL_ENDOFWHOIS => with("End of WHOIS list"),

        Response::ERR_NEEDMOREPARAMS => format!("{command} :Not enough parameters"),
        Response::ERR_UNKNOWNCOMMAND => format!("{command} :Unknown command"),
        Response::ERR_PASSWDMISMATCH => ":Password incorrect".to_string(),
        Response::ERR_ALREADYREGISTRED => {
            ":Unauthorized command (already registered)".to_string()
        }
        Response::ERR_NOTREGISTERED => ":You have not registered".to_string(),
        Response::ERR_NONICKNAMEGIVEN => ":No nickname given".to_string(),
        Response::ERR_NOORIGIN => ":No origin specified".to_string(),
        Response::ERR_NORECIPIENT => ":No recipient given".to_string(),
        Response::ERR_NOTEXTTOSEND => ":No text to send".to_string(),

        Response::ERR_NICKNAMEINUSE => with("Nickname is already in use"),
        Response::ERR_ERRONEUSNICKNAME => with("Erroneous nickname"),
        Response::ERR_ERRONEUSUSER => with("Erroneous format"),
        Response::ERR_NOSUCHSERVER => with("No such server"),
        Response::ERR_NOSUCHNICK => with("No such nick/channel"),
        Response::ERR_NOSUCHCHANNEL => with("No such channel"),
        Response::ERR_CANNOTSENDTOCHAN => with("Cannot send to channel"),
        Response::ERR_TOOMANYTARGETS => with("Too many targets"),
        Response::ERR_NOTONCHANNEL => with("You're not on the channel"),
        Response::ERR_USERONCHANNEL => with("User already in the channel"),
        Response::ERR_INVITEONLYCHAN => with("Cannot join channel (+i)"),
        Response::ERR_CHANNELISFULL => with("Cannot join channel (+l)"),
        Response::ERR_BADCHANNELKEY => with("Cannot join channel (+k)"),
        Response::ERR_BADCHANMASK => with("Bad Channel Mask"),
        Response::ERR_UNKNOWNMODE => with("Unknown mode"),
        Response::ERR_CHANOPRIVSNEEDED => with("You're not channel operator"),

        // No template: echo what was sent so the reply is still visible.
        _ => format!("{command} {arguments}"),
    }
}
