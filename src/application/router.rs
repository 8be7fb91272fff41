//! Router - the public surface tying config, plugins, session and relay
//! together
//!
//! Construction validates the options; nothing else happens until `start`,
//! which loads plugins, installs the relay subscriptions and logs in. A
//! validation or plugin-directory failure aborts startup before any session
//! state exists.

use std::sync::Arc;

use crate::application::errors::{BotError, PluginError};
use crate::application::messaging::EventRelay;
use crate::bus::EventBus;
use crate::context::BotContext;
use crate::domain::traits::{Activity, Gateway};
use crate::infrastructure::config::Options;
use crate::infrastructure::plugins::{LoadedPlugin, PluginLoader, PluginRegistry};
use crate::infrastructure::session::{SessionManager, SessionMode};

pub struct Router {
    ctx: BotContext,
    session: Arc<SessionManager>,
    relay: EventRelay,
    loader: PluginLoader,
    registry: PluginRegistry,
    options: Arc<Options>,
    /// Bus position where the current plugin generation's listeners start.
    plugin_mark: std::sync::Mutex<Option<usize>>,
}

impl Router {
    /// Validate the options and wire up the router.
    ///
    /// The session mode is detected from the environment; in sharded-worker
    /// mode the token requirement is waived.
    pub fn new(options: Options, gateway: Arc<dyn Gateway>) -> Result<Self, BotError> {
        Self::with_mode(options, gateway, SessionMode::detect())
    }

    pub fn with_mode(
        options: Options,
        gateway: Arc<dyn Gateway>,
        mode: SessionMode,
    ) -> Result<Self, BotError> {
        options.validate(mode == SessionMode::ShardedWorker)?;

        let options = Arc::new(options);
        let bus = Arc::new(EventBus::new());
        let ctx = BotContext::new(Arc::clone(&options), Arc::clone(&bus));
        let session = Arc::new(SessionManager::new(
            Arc::clone(&gateway),
            Arc::clone(&options),
            mode,
        ));
        let relay = EventRelay::new(gateway, bus, Arc::clone(&session), &options);
        let loader = PluginLoader::new(options.plugins_dir.clone());

        Ok(Self {
            ctx,
            session,
            relay,
            loader,
            registry: PluginRegistry::new(),
            options,
            plugin_mark: std::sync::Mutex::new(None),
        })
    }

    pub fn context(&self) -> &BotContext {
        &self.ctx
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Load plugins, wire the relay, log in and pump events until the
    /// gateway stream ends.
    pub async fn start(&self) -> Result<(), BotError> {
        self.reload_plugins()?;
        self.relay.install(&self.options);
        self.session.login().await.map_err(BotError::from)?;
        self.relay.run().await;
        Ok(())
    }

    /// Full reimport of every plugin bundle, replacing the registry.
    ///
    /// The previous plugin generation's bus listeners are dropped first so
    /// nothing from a retired library stays subscribed after the library is
    /// unloaded. Any failure leaves the previous registry in place.
    pub fn reload_plugins(&self) -> Result<(), PluginError> {
        let loaded = self.loader.load_all()?;
        self.install(loaded)
    }

    fn install(&self, loaded: Vec<(String, LoadedPlugin)>) -> Result<(), PluginError> {
        let bus = self.ctx.bus();
        let mut mark = self.plugin_mark.lock().unwrap_or_else(|e| e.into_inner());
        let base = match *mark {
            Some(base) => {
                bus.truncate(base);
                base
            }
            None => bus.listener_count(),
        };
        *mark = Some(base);

        for (name, plugin) in &loaded {
            if let Err(e) = plugin.plugin().register(&self.ctx) {
                // Whatever the failed generation already subscribed has to
                // come off the bus while its libraries are still mapped.
                bus.truncate(base);
                return Err(PluginError::Register(name.clone(), e));
            }
        }

        tracing::info!("Loaded {} plugin(s)", loaded.len());
        self.registry.replace(loaded);
        Ok(())
    }

    /// Tear down and re-login if connected, otherwise just log in.
    pub async fn restart(&self) -> Result<(), BotError> {
        self.session.restart().await.map_err(BotError::from)
    }

    /// Best-effort presence update.
    pub async fn set_activity(&self, activity: &Activity) {
        self.session.set_activity(activity).await;
    }
}
