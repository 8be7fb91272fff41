//! Plugin system
//!
//! Plugins are dynamically loaded shared libraries discovered under the
//! configured plugins directory. Each bundle is a directory carrying a
//! `plugin.yaml` manifest next to its library; the library exposes a
//! `relaybot_plugin_init` entry point returning a [`Plugin`]. Registration
//! hands every plugin the shared [`crate::context::BotContext`], from which
//! it attaches its bus listeners.

pub mod loader;
pub mod manifest;
pub mod registry;

pub use loader::{LoadedPlugin, Plugin, PluginLoader};
pub use manifest::PluginManifest;
pub use registry::PluginRegistry;
