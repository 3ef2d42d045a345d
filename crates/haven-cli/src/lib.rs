//! haven-cli library root.
//!
//! Re-exports internal modules so that integration tests can drive the
//! commands with in-memory input and output instead of a terminal.

pub mod cli;
pub mod commands;
pub mod config;
