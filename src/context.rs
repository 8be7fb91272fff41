//! Shared context handed to plugin registration.
//!
//! The context is constructed exactly once during bootstrap and cloned into
//! every plugin's `register` call; there is no global singleton to reach for.

use std::sync::Arc;

use crate::bus::EventBus;
use crate::infrastructure::config::Options;

#[derive(Clone)]
pub struct BotContext {
    options: Arc<Options>,
    bus: Arc<EventBus>,
}

impl BotContext {
    pub fn new(options: Arc<Options>, bus: Arc<EventBus>) -> Self {
        Self { options, bus }
    }

    /// Startup options, immutable for the process lifetime.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The shared event bus plugins subscribe on.
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Whether a user id belongs to a configured owner.
    pub fn is_owner(&self, user_id: &str) -> bool {
        self.options.owners.iter().any(|o| o == user_id)
    }
}
