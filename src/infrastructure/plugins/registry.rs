//! Plugin registry - the in-memory map of loaded plugins
//!
//! A reload replaces the whole registry; there is no merging or diffing.
//! Replaced plugins get `shutdown` before their libraries are unloaded.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::loader::{LoadedPlugin, Plugin};

pub struct PluginRegistry {
    plugins: RwLock<HashMap<String, LoadedPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(HashMap::new()),
        }
    }

    /// Swap in a freshly loaded set of plugins, retiring the old one.
    pub fn replace(&self, loaded: Vec<(String, LoadedPlugin)>) {
        let fresh: HashMap<_, _> = loaded.into_iter().collect();
        let old = {
            let mut plugins = self.plugins.write().unwrap_or_else(|e| e.into_inner());
            std::mem::replace(&mut *plugins, fresh)
        };
        for (name, plugin) in old {
            tracing::debug!("Retiring plugin: {}", name);
            plugin.plugin().shutdown();
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        let plugins = self.plugins.read().unwrap_or_else(|e| e.into_inner());
        plugins.get(name).map(|p| Arc::clone(p.instance()))
    }

    pub fn names(&self) -> Vec<String> {
        let plugins = self.plugins.read().unwrap_or_else(|e| e.into_inner());
        plugins.keys().cloned().collect()
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        let plugins = self.plugins.read().unwrap_or_else(|e| e.into_inner());
        plugins.contains_key(name)
    }

    pub fn len(&self) -> usize {
        let plugins = self.plugins.read().unwrap_or_else(|e| e.into_inner());
        plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
