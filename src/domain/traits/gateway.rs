use async_trait::async_trait;

use crate::application::errors::GatewayError;
use crate::domain::entities::User;
use crate::domain::events::{Event, EventKind};

/// Connection state of the underlying platform session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

/// Kinds of presence activity the platform understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Playing,
    Streaming,
    Listening,
    Watching,
    Competing,
}

/// A presence activity shown next to the bot account.
#[derive(Debug, Clone)]
pub struct Activity {
    pub name: String,
    pub kind: ActivityKind,
}

impl Activity {
    pub fn playing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ActivityKind::Playing,
        }
    }
}

/// Gateway trait - abstraction over the platform client connection.
///
/// The wire protocol lives entirely behind this seam. A gateway delivers only
/// event kinds that were subscribed via [`Gateway::subscribe`]; kinds that
/// were never subscribed are never installed on the connection at all.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Authenticate the session. `None` means credentials are supplied
    /// out-of-band (sharded-worker mode).
    async fn login(&self, token: Option<&str>) -> Result<(), GatewayError>;

    /// Tear the session down.
    async fn destroy(&self) -> Result<(), GatewayError>;

    /// Current connection state.
    fn status(&self) -> ConnectionStatus;

    /// Install a subscription for one event kind.
    fn subscribe(&self, kind: EventKind);

    /// Number of event kinds currently subscribed.
    fn subscription_count(&self) -> usize;

    /// The bot's own account, once known (after login).
    fn current_user(&self) -> Option<User>;

    /// Update the bot's presence activity.
    async fn set_activity(&self, activity: &Activity) -> Result<(), GatewayError>;

    /// Wait for the next subscribed event. `None` means the connection is
    /// gone for good and the pump loop should stop.
    async fn next_event(&self) -> Option<Event>;
}
