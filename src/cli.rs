use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Terminal client for a shared team task service.
/// Configuration defaults to ~/.tt/config.json or a path passed via --config.
#[derive(Parser)]
#[command(name = "tt", version, about = "Team task management from the terminal")]
pub struct Cli {
    /// Path to the JSON config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
