//! Plugin manifest definition

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::PluginError;

/// Metadata carried by every plugin bundle (`plugin.yaml`)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginManifest {
    /// Plugin name (required)
    pub name: String,

    /// Plugin version (required)
    pub version: String,

    /// Plugin description
    pub description: Option<String>,

    /// Plugin author
    pub author: Option<String>,

    /// Path to the shared library, relative to the bundle directory.
    /// Defaults to `librelaybot_<name>.so`.
    pub library: Option<PathBuf>,
}

impl PluginManifest {
    pub const FILE_NAME: &'static str = "plugin.yaml";

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, PluginError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PluginError::Load(format!("Failed to read manifest: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| PluginError::Load(format!("Failed to parse manifest: {}", e)))
    }

    /// The library filename used when the manifest does not name one.
    pub fn default_library(&self) -> PathBuf {
        PathBuf::from(format!("librelaybot_{}.so", self.name))
    }
}
