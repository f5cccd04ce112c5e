//! Command-line interface for soundseek.
//!
//! This module provides CLI commands for searching providers, browsing
//! artists and albums, resolving streams and fetching lyrics.

mod commands;

pub use commands::{Cli, Commands, run_command};
