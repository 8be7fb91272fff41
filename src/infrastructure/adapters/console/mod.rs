//! Console gateway for development/testing
//!
//! An in-process `Gateway` with an injectable event queue: the `run` command
//! feeds stdin lines through it as chat messages, and integration tests use
//! it to observe subscriptions, logins and delivered events.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use tokio::sync::mpsc;

use crate::application::errors::GatewayError;
use crate::domain::entities::{Message, User};
use crate::domain::events::{Event, EventKind};
use crate::domain::traits::{Activity, ConnectionStatus, Gateway};

struct State {
    status: ConnectionStatus,
    subscriptions: HashSet<EventKind>,
    login_count: usize,
    activities: Vec<String>,
}

/// Queue item: `None` is the end-of-stream sentinel `close` pushes.
type QueueItem = Option<Event>;

pub struct ConsoleGateway {
    user: User,
    state: Mutex<State>,
    tx: mpsc::UnboundedSender<QueueItem>,
    rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<QueueItem>>,
}

impl ConsoleGateway {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            user: User::new("100000000000000000")
                .with_username("relaybot")
                .as_bot(),
            state: Mutex::new(State {
                status: ConnectionStatus::Disconnected,
                subscriptions: HashSet::new(),
                login_count: 0,
                activities: Vec::new(),
            }),
            tx,
            rx: tokio::sync::Mutex::new(rx),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue an event for delivery. Unsubscribed kinds are dropped at the
    /// receiving end, not here.
    pub fn inject(&self, event: Event) {
        let _ = self.tx.send(Some(event));
    }

    /// Queue a console-user chat message.
    pub fn inject_line(&self, line: &str) {
        let author = User::new("900000000000000009").with_username("console");
        self.inject(Event::MessageCreate(Message::new("console", author, line)));
    }

    /// End the event stream: everything queued so far is still delivered,
    /// then `next_event` returns `None`.
    pub fn close(&self) {
        let _ = self.tx.send(None);
    }

    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.state().subscriptions.contains(&kind)
    }

    pub fn login_count(&self) -> usize {
        self.state().login_count
    }

    pub fn activities(&self) -> Vec<String> {
        self.state().activities.clone()
    }
}

impl Default for ConsoleGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for ConsoleGateway {
    async fn login(&self, token: Option<&str>) -> Result<(), GatewayError> {
        let mut state = self.state();
        match token {
            Some(t) => {
                let preview: String = t.chars().take(4).collect();
                tracing::info!("Console login (token: {}...)", preview);
            }
            None => tracing::info!("Console login (sharded worker, no explicit token)"),
        }
        state.status = ConnectionStatus::Connected;
        state.login_count += 1;
        drop(state);
        let _ = self.tx.send(Some(Event::Ready));
        Ok(())
    }

    async fn destroy(&self) -> Result<(), GatewayError> {
        tracing::info!("Console session destroyed");
        self.state().status = ConnectionStatus::Disconnected;
        Ok(())
    }

    fn status(&self) -> ConnectionStatus {
        self.state().status
    }

    fn subscribe(&self, kind: EventKind) {
        self.state().subscriptions.insert(kind);
    }

    fn subscription_count(&self) -> usize {
        self.state().subscriptions.len()
    }

    fn current_user(&self) -> Option<User> {
        Some(self.user.clone())
    }

    async fn set_activity(&self, activity: &Activity) -> Result<(), GatewayError> {
        let mut state = self.state();
        if state.status != ConnectionStatus::Connected {
            return Err(GatewayError::NotConnected);
        }
        state.activities.push(activity.name.clone());
        Ok(())
    }

    async fn next_event(&self) -> Option<Event> {
        let mut rx = self.rx.lock().await;
        loop {
            let event = rx.recv().await??;
            if self.is_subscribed(event.kind()) {
                return Some(event);
            }
            tracing::trace!("Dropping unsubscribed {}", event.kind().as_str());
        }
    }
}
