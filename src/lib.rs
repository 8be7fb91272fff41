//! relaybot - a minimal event-relay router for chat-platform bots
//!
//! The router logs in one platform session, relays a fixed vocabulary of
//! gateway events onto an in-process bus, parses trigger-prefixed chat
//! messages into commands, and loads externally authored plugins from a
//! configured directory. Plugins receive a [`context::BotContext`] at
//! registration and attach their listeners to the shared [`bus::EventBus`].

pub mod application;
pub mod bus;
pub mod context;
pub mod domain;
pub mod infrastructure;

pub use application::errors::BotError;
pub use application::router::Router;
pub use bus::EventBus;
pub use context::BotContext;
pub use domain::entities::{Message, User};
pub use domain::events::{CommandInvocation, Event, EventKind};
pub use domain::traits::{Activity, ActivityKind, ConnectionStatus, Gateway};
pub use infrastructure::config::Options;
pub use infrastructure::plugins::Plugin;
