//! Message handling - command parsing and event relaying

pub mod parser;
pub mod relay;

pub use parser::CommandParser;
pub use relay::EventRelay;
