//! Startup options: loading and validation
//!
//! Options are immutable after startup. Validation collects every violation
//! instead of stopping at the first, so a bad config is reported in one shot.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::application::errors::{ConfigError, Violation};

/// Platform user ids are snowflakes: 17 to 19 decimal digits.
static OWNER_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{17,19}$").unwrap());

/// Router startup options
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Options {
    /// Directory plugin bundles are discovered under.
    pub plugins_dir: PathBuf,

    /// Auth token. Not required in sharded-worker mode, where credentials
    /// arrive out-of-band from the sharding supervisor.
    #[serde(default)]
    pub token: Option<String>,

    /// Prefix a chat message must open with to be parsed as a command.
    pub trigger: String,

    /// Forward reaction add/remove events.
    #[serde(default)]
    pub reactions: bool,

    /// Forward guild join/leave events.
    #[serde(default)]
    pub guilds: bool,

    /// Forward member join/leave events.
    #[serde(default)]
    pub members: bool,

    /// Platform user ids of the bot owners.
    #[serde(default)]
    pub owners: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            plugins_dir: PathBuf::from("./plugins"),
            token: None,
            trigger: "!".to_string(),
            reactions: false,
            guilds: false,
            members: false,
            owners: Vec::new(),
        }
    }
}

impl Options {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Build options from environment variables on top of the defaults.
    pub fn load_env() -> Self {
        let mut options = Options::default();

        if let Ok(token) = std::env::var("BOT_TOKEN") {
            options.token = Some(token);
        }
        if let Ok(trigger) = std::env::var("BOT_TRIGGER") {
            options.trigger = trigger;
        }
        if let Ok(dir) = std::env::var("BOT_PLUGINS_DIR") {
            options.plugins_dir = PathBuf::from(dir);
        }
        if let Ok(owners) = std::env::var("BOT_OWNERS") {
            options.owners = owners
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        options
    }

    /// Validate the options, collecting every violation.
    ///
    /// `sharded` waives the token requirement; everything else is always
    /// checked. On `Err`, startup must not proceed to plugin loading or
    /// login.
    pub fn validate(&self, sharded: bool) -> Result<(), ConfigError> {
        let mut violations = Vec::new();

        if self.plugins_dir.as_os_str().is_empty() {
            violations.push(Violation::new("plugins-dir", "must not be empty"));
        }

        if self.trigger.is_empty() {
            violations.push(Violation::new("trigger", "must not be empty"));
        }

        if self.owners.is_empty() {
            violations.push(Violation::new("owners", "at least one owner is required"));
        } else {
            let mut seen = HashSet::new();
            for owner in &self.owners {
                if !seen.insert(owner) {
                    violations.push(Violation::new(
                        "owners",
                        format!("duplicate entry '{}'", owner),
                    ));
                }
                if !OWNER_ID_RE.is_match(owner) {
                    violations.push(Violation::new(
                        "owners",
                        format!("'{}' is not a 17-19 digit user id", owner),
                    ));
                }
            }
        }

        if !sharded {
            match &self.token {
                Some(token) if !token.is_empty() => {}
                _ => violations.push(Violation::new(
                    "token",
                    "required unless running as a sharded worker",
                )),
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(violations))
        }
    }
}
