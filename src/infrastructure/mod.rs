//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Startup options loading and validation
//! - Session: The single client-connection lifecycle
//! - Plugins: Dynamic loading of plugin bundles
//! - Adapters: Gateway implementations (console)

pub mod adapters;
pub mod config;
pub mod plugins;
pub mod session;
