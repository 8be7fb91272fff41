//! Command parser - turns trigger-prefixed chat messages into commands
//!
//! Filtered messages are dropped silently; nothing distinguishes "not a
//! command" from "malformed command" and no acknowledgement goes back to
//! the chat.

use crate::domain::entities::{Message, User};
use crate::domain::events::CommandInvocation;

pub struct CommandParser {
    trigger: String,
}

impl CommandParser {
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
        }
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Parse a message against the trigger, applying the drop filters in
    /// order: own message, bot author, too short, wrong prefix. Returns
    /// `None` when any filter hits.
    pub fn parse(&self, message: &Message, me: Option<&User>) -> Option<CommandInvocation> {
        if let Some(me) = me {
            if message.author.id == me.id {
                return None;
            }
        }
        if message.author.is_bot {
            return None;
        }
        if message.content.len() < self.trigger.len() {
            return None;
        }
        if !message.content.starts_with(&self.trigger) {
            return None;
        }

        // Runs of spaces separate arguments; tabs and newlines stay inside
        // their argument.
        let args: Vec<String> = message
            .content
            .split(' ')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let name = args
            .first()?
            .strip_prefix(&self.trigger)
            .unwrap_or_default()
            .to_lowercase();

        Some(CommandInvocation {
            name,
            args,
            message: message.clone(),
        })
    }
}
