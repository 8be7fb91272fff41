//! Gateway adapters
//!
//! The wire protocol lives behind the `Gateway` trait; this module holds the
//! in-process console adapter used for development and tests.

pub mod console;
