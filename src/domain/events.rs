//! The closed event vocabulary relayed between the gateway, the bus and
//! plugins. Every platform event the router cares about has a typed variant
//! here; there is no string-named dispatch and no untyped argument list.

use super::entities::{Message, User};

/// A guild (server) the bot is a member of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: String,
    pub name: String,
}

impl Guild {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A guild member, as carried by join/leave events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    pub guild_id: String,
    pub user: User,
}

/// A reaction placed on (or removed from) a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub channel_id: String,
    pub message_id: String,
    pub emoji: String,
}

/// A chat message recognized as a command by the parser.
///
/// `args` is the full whitespace split of the message content, including the
/// still-prefixed first token; `name` is that first token with the trigger
/// stripped and lower-cased.
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    pub name: String,
    pub args: Vec<String>,
    pub message: Message,
}

/// Events published on the bus.
///
/// Gateways emit every variant except [`Event::Command`], which is
/// synthesized by the relay from `MessageCreate`. `MessageCreate` itself is
/// consumed by the relay and never forwarded raw.
#[derive(Debug, Clone)]
pub enum Event {
    /// The session finished logging in and is live.
    Ready,
    /// The session lost its connection.
    Disconnected,
    /// A chat message arrived.
    MessageCreate(Message),
    ReactionAdded { reaction: Reaction, user: User },
    ReactionRemoved { reaction: Reaction, user: User },
    MemberJoined(GuildMember),
    MemberLeft(GuildMember),
    GuildJoined(Guild),
    GuildLeft(Guild),
    /// A message matched the configured trigger prefix.
    Command(CommandInvocation),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Ready => EventKind::Ready,
            Event::Disconnected => EventKind::Disconnected,
            Event::MessageCreate(_) => EventKind::MessageCreate,
            Event::ReactionAdded { .. } => EventKind::ReactionAdded,
            Event::ReactionRemoved { .. } => EventKind::ReactionRemoved,
            Event::MemberJoined(_) => EventKind::MemberJoined,
            Event::MemberLeft(_) => EventKind::MemberLeft,
            Event::GuildJoined(_) => EventKind::GuildJoined,
            Event::GuildLeft(_) => EventKind::GuildLeft,
            Event::Command(_) => EventKind::Command,
        }
    }
}

/// Fieldless mirror of [`Event`], used for gateway subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ready,
    Disconnected,
    MessageCreate,
    ReactionAdded,
    ReactionRemoved,
    MemberJoined,
    MemberLeft,
    GuildJoined,
    GuildLeft,
    Command,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Ready => "ready",
            EventKind::Disconnected => "disconnected",
            EventKind::MessageCreate => "message",
            EventKind::ReactionAdded => "reaction-added",
            EventKind::ReactionRemoved => "reaction-removed",
            EventKind::MemberJoined => "member-joined",
            EventKind::MemberLeft => "member-left",
            EventKind::GuildJoined => "guild-joined",
            EventKind::GuildLeft => "guild-left",
            EventKind::Command => "cmd",
        }
    }
}
