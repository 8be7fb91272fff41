//! Domain layer - Core types with no infrastructure dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (User, Message)
//! - Events: The closed event vocabulary relayed to plugins
//! - Traits: Abstractions for infrastructure (Gateway)

pub mod entities;
pub mod events;
pub mod traits;
