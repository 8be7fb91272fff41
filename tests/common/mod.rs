//! Shared test support: a gateway that records every call made to it.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use relaybot::application::errors::GatewayError;
use relaybot::{Activity, ConnectionStatus, Event, EventKind, Gateway, Options, User};

pub struct RecordingGateway {
    calls: Mutex<Vec<String>>,
    status: Mutex<ConnectionStatus>,
    subscriptions: Mutex<HashSet<EventKind>>,
    pub fail_activity: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            status: Mutex::new(ConnectionStatus::Disconnected),
            subscriptions: Mutex::new(HashSet::new()),
            fail_activity: false,
        }
    }

    pub fn failing_activity() -> Self {
        Self {
            fail_activity: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn login_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with("login"))
            .count()
    }

    pub fn set_status(&self, status: ConnectionStatus) {
        *self.status.lock().unwrap() = status;
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn login(&self, token: Option<&str>) -> Result<(), GatewayError> {
        match token {
            Some(t) => self.record(format!("login({})", t)),
            None => self.record("login(out-of-band)"),
        }
        *self.status.lock().unwrap() = ConnectionStatus::Connected;
        Ok(())
    }

    async fn destroy(&self) -> Result<(), GatewayError> {
        self.record("destroy");
        *self.status.lock().unwrap() = ConnectionStatus::Disconnected;
        Ok(())
    }

    fn status(&self) -> ConnectionStatus {
        *self.status.lock().unwrap()
    }

    fn subscribe(&self, kind: EventKind) {
        self.subscriptions.lock().unwrap().insert(kind);
    }

    fn subscription_count(&self) -> usize {
        self.subscriptions.lock().unwrap().len()
    }

    fn current_user(&self) -> Option<User> {
        Some(User::new("100000000000000000").with_username("relaybot").as_bot())
    }

    async fn set_activity(&self, activity: &Activity) -> Result<(), GatewayError> {
        self.record(format!("set_activity({})", activity.name));
        if self.fail_activity {
            return Err(GatewayError::Network("presence endpoint down".into()));
        }
        Ok(())
    }

    async fn next_event(&self) -> Option<Event> {
        None
    }
}

/// Options that pass validation, pointed at a throwaway plugins directory.
pub fn valid_options(plugins_dir: &std::path::Path) -> Options {
    Options {
        plugins_dir: plugins_dir.to_path_buf(),
        token: Some("secret-token".to_string()),
        trigger: "!".to_string(),
        reactions: false,
        guilds: false,
        members: false,
        owners: vec!["123456789012345678".to_string()],
    }
}

/// A unique empty directory under the system temp dir.
pub fn scratch_dir(tag: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("relaybot-{}-{}", tag, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
