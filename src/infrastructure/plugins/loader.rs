//! Plugin loader - discovers and loads plugin bundles from shared libraries

use libloading::{Library, Symbol};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::manifest::PluginManifest;
use crate::application::errors::PluginError;
use crate::context::BotContext;

/// Entry point every plugin library must export as `relaybot_plugin_init`.
pub type PluginInitFn = extern "C" fn() -> *mut dyn Plugin;

const INIT_SYMBOL: &[u8] = b"relaybot_plugin_init";

/// Contract every plugin implements.
///
/// `register` receives the shared context and is where the plugin attaches
/// its bus listeners; it runs once per load.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    /// Attach listeners and acquire whatever the plugin needs.
    fn register(&self, ctx: &BotContext) -> Result<(), String>;

    /// Release resources before the plugin is unloaded.
    fn shutdown(&self) {}
}

/// A plugin held in memory, together with the library that backs it.
///
/// Field order matters: the instance must drop before the library it came
/// from is unloaded.
pub struct LoadedPlugin {
    instance: Arc<dyn Plugin>,
    manifest: PluginManifest,
    #[allow(dead_code)]
    library: Option<Library>,
}

impl LoadedPlugin {
    /// Wrap an in-process plugin that is not backed by a shared library.
    pub fn builtin(instance: Arc<dyn Plugin>, manifest: PluginManifest) -> Self {
        Self {
            instance,
            manifest,
            library: None,
        }
    }

    pub fn plugin(&self) -> &dyn Plugin {
        self.instance.as_ref()
    }

    pub fn instance(&self) -> &Arc<dyn Plugin> {
        &self.instance
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }
}

/// Discovers plugin bundles under a directory and loads them.
pub struct PluginLoader {
    plugins_dir: PathBuf,
}

impl PluginLoader {
    pub fn new(plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
        }
    }

    pub fn plugins_dir(&self) -> &Path {
        &self.plugins_dir
    }

    /// Load every bundle under the plugins directory, recursively.
    ///
    /// Returns the loaded plugins keyed by the bundle path relative to the
    /// plugins directory. A missing directory or any single bundle failure
    /// aborts the whole load; the caller never sees a partial result.
    pub fn load_all(&self) -> Result<Vec<(String, LoadedPlugin)>, PluginError> {
        if !self.plugins_dir.is_dir() {
            return Err(PluginError::DirectoryMissing(self.plugins_dir.clone()));
        }

        let mut plugins = Vec::new();
        self.scan(&self.plugins_dir, &mut plugins)?;
        Ok(plugins)
    }

    fn scan(
        &self,
        dir: &Path,
        plugins: &mut Vec<(String, LoadedPlugin)>,
    ) -> Result<(), PluginError> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| PluginError::Load(format!("Failed to read {}: {}", dir.display(), e)))?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                PluginError::Load(format!("Failed to read entry in {}: {}", dir.display(), e))
            })?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    continue;
                }
            }

            if path.join(PluginManifest::FILE_NAME).is_file() {
                let plugin = self.load_bundle(&path)?;
                plugins.push((self.bundle_key(&path), plugin));
            } else {
                // Not a bundle itself; descend.
                self.scan(&path, plugins)?;
            }
        }

        Ok(())
    }

    /// The registry key: bundle path relative to the plugins directory.
    fn bundle_key(&self, path: &Path) -> String {
        path.strip_prefix(&self.plugins_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace(std::path::MAIN_SEPARATOR, "/")
    }

    /// Load a single bundle directory.
    pub fn load_bundle(&self, path: impl AsRef<Path>) -> Result<LoadedPlugin, PluginError> {
        let path = path.as_ref();

        let manifest = PluginManifest::from_file(path.join(PluginManifest::FILE_NAME))?;

        let library_path = match &manifest.library {
            Some(lib) => path.join(lib),
            None => path.join(manifest.default_library()),
        };
        if !library_path.exists() {
            return Err(PluginError::Load(format!(
                "Library not found: {}",
                library_path.display()
            )));
        }

        let library = unsafe {
            Library::new(&library_path)
                .map_err(|e| PluginError::Load(format!("Failed to load library: {}", e)))?
        };

        let init_fn: Symbol<PluginInitFn> = unsafe {
            library.get(INIT_SYMBOL).map_err(|e| {
                PluginError::Load(format!(
                    "No init symbol in {}: {}",
                    library_path.display(),
                    e
                ))
            })?
        };

        let instance = unsafe {
            let ptr = init_fn();
            if ptr.is_null() {
                return Err(PluginError::Load("Plugin init returned null".to_string()));
            }
            Arc::from_raw(ptr)
        };

        tracing::info!(
            "Loaded plugin: {} v{}",
            instance.name(),
            instance.version()
        );

        Ok(LoadedPlugin {
            instance,
            manifest,
            library: Some(library),
        })
    }
}
