//! Application layer - Orchestration and message handling
//!
//! This layer contains:
//! - Errors: Per-layer error taxonomy
//! - Messaging: Command parsing and event relaying
//! - Router: The public start/restart/reload surface

pub mod errors;
pub mod messaging;
pub mod router;
