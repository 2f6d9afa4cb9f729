//! bayan-console library root.
//!
//! Re-exports the host modules so integration tests can drive config
//! loading and command parsing without a terminal.

pub mod config;
pub mod repl;
