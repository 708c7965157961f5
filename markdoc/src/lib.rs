//! Expose markdoc's command handlers for use in integration tests. The binary
//! in `main.rs` is the supported entry point.
pub mod cli;
pub mod commands;
