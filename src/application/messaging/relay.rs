//! Event relay - forwards gateway events onto the shared bus
//!
//! A fixed vocabulary is relayed verbatim under its own variant. Chat
//! messages are the one exception: they pass through the command parser and
//! surface only as `Command` events. A disconnect forwards to the bus and
//! triggers exactly one immediate re-login.

use std::sync::Arc;

use super::parser::CommandParser;
use crate::bus::EventBus;
use crate::domain::events::{Event, EventKind};
use crate::domain::traits::Gateway;
use crate::infrastructure::config::Options;
use crate::infrastructure::session::SessionManager;

pub struct EventRelay {
    gateway: Arc<dyn Gateway>,
    bus: Arc<EventBus>,
    session: Arc<SessionManager>,
    parser: CommandParser,
}

impl EventRelay {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        bus: Arc<EventBus>,
        session: Arc<SessionManager>,
        options: &Options,
    ) -> Self {
        Self {
            gateway,
            bus,
            session,
            parser: CommandParser::new(options.trigger.clone()),
        }
    }

    /// Install gateway subscriptions for the relayed vocabulary.
    ///
    /// Ready, disconnect and message handling are always on. Reactions,
    /// members and guilds are subscribed only when their option flag is set;
    /// a disabled flag means the subscription is never installed at all.
    pub fn install(&self, options: &Options) {
        self.gateway.subscribe(EventKind::Ready);
        self.gateway.subscribe(EventKind::Disconnected);
        self.gateway.subscribe(EventKind::MessageCreate);
        if options.reactions {
            self.gateway.subscribe(EventKind::ReactionAdded);
            self.gateway.subscribe(EventKind::ReactionRemoved);
        }
        if options.members {
            self.gateway.subscribe(EventKind::MemberJoined);
            self.gateway.subscribe(EventKind::MemberLeft);
        }
        if options.guilds {
            self.gateway.subscribe(EventKind::GuildJoined);
            self.gateway.subscribe(EventKind::GuildLeft);
        }
    }

    /// Drain gateway events until the connection is gone for good.
    pub async fn run(&self) {
        while let Some(event) = self.gateway.next_event().await {
            self.dispatch(event).await;
        }
        tracing::info!("Gateway event stream ended");
    }

    /// Route one gateway event.
    pub async fn dispatch(&self, event: Event) {
        match event {
            Event::MessageCreate(message) => {
                let me = self.gateway.current_user();
                if let Some(cmd) = self.parser.parse(&message, me.as_ref()) {
                    tracing::debug!("Command '{}' from {}", cmd.name, message.author);
                    self.bus.publish(&Event::Command(cmd));
                }
            }
            Event::Disconnected => {
                tracing::warn!("Gateway disconnected, attempting to log back in");
                self.bus.publish(&Event::Disconnected);
                if let Err(e) = self.session.login().await {
                    tracing::error!("Reconnect failed: {}", e);
                }
            }
            other => {
                tracing::trace!("Relaying {}", other.kind().as_str());
                self.bus.publish(&other);
            }
        }
    }
}
