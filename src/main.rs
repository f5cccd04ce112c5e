//! SoundSeek - multi-provider music search and stream resolution.
//!
//! Queries a prioritized chain of free music sources (video-hosting mirrors,
//! a free-music catalog, multi-engine aggregator workers, a commercial
//! metadata fallback), normalizes their results into one record shape and
//! resolves playable stream URLs on demand.

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod search;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("soundseek=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
