//! Safety checklist command line library.
//!
//! This library backs the `sc-core` binary:
//! - Exit codes for CLI operations
//! - Report configuration resolution
//! - Structured logging setup
//! - Command payload formatting
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod exit_codes;
pub mod logging;
pub mod output;
