pub mod gateway;

pub use gateway::{Activity, ActivityKind, ConnectionStatus, Gateway};
