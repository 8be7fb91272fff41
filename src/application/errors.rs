//! Application layer errors

use std::fmt;
use thiserror::Error;

/// General router errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// A single configuration violation (field + what is wrong with it).
#[derive(Debug, Clone)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid options: {}", format_violations(.0))]
    Invalid(Vec<Violation>),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Plugin loading/registration errors
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Plugin directory {0} does not exist. Please create it.")]
    DirectoryMissing(std::path::PathBuf),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Plugin '{0}' failed to register: {1}")]
    Register(String, String),
}

/// Errors surfaced by the platform gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not connected")]
    NotConnected,
}
