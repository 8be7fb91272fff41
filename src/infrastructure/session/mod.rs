//! Session lifecycle for the single platform connection
//!
//! Exactly one session exists per process; it is created once during
//! bootstrap and torn down/re-created only through [`SessionManager::restart`].

use std::sync::Arc;

use crate::application::errors::GatewayError;
use crate::domain::traits::{Activity, ConnectionStatus, Gateway};
use crate::infrastructure::config::Options;

/// Environment marker a sharding supervisor sets on its workers.
pub const SHARD_ENV: &str = "SHARD_ID";

/// How the session authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Token from the options, passed explicitly at login.
    Standalone,
    /// One of several coordinated workers; credentials arrive out-of-band.
    ShardedWorker,
}

impl SessionMode {
    /// Detect the mode from the environment.
    pub fn detect() -> Self {
        if std::env::var_os(SHARD_ENV).is_some() {
            SessionMode::ShardedWorker
        } else {
            SessionMode::Standalone
        }
    }
}

/// Owns the gateway connection and its login/restart/activity operations.
pub struct SessionManager {
    gateway: Arc<dyn Gateway>,
    options: Arc<Options>,
    mode: SessionMode,
}

impl SessionManager {
    pub fn new(gateway: Arc<dyn Gateway>, options: Arc<Options>, mode: SessionMode) -> Self {
        Self {
            gateway,
            options,
            mode,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn gateway(&self) -> &Arc<dyn Gateway> {
        &self.gateway
    }

    /// Authenticate, using the mode-dependent credential path.
    pub async fn login(&self) -> Result<(), GatewayError> {
        match self.mode {
            SessionMode::ShardedWorker => self.gateway.login(None).await,
            SessionMode::Standalone => self.gateway.login(self.options.token.as_deref()).await,
        }
    }

    /// Tear down and re-login if currently connected, otherwise just login.
    pub async fn restart(&self) -> Result<(), GatewayError> {
        if self.gateway.status() == ConnectionStatus::Connected {
            self.gateway.destroy().await?;
        }
        self.login().await
    }

    /// Best-effort presence update; failures are logged, never propagated.
    pub async fn set_activity(&self, activity: &Activity) {
        if let Err(e) = self.gateway.set_activity(activity).await {
            tracing::warn!("Failed to set activity '{}': {}", activity.name, e);
        }
    }
}
