//! # TT - Team Tasks terminal client
//!
//! A terminal client for a shared team task service: create recurring tasks,
//! browse the day's board, and comment on tasks without leaving the shell.
//!
//! ## Key Features
//!
//! - **Recurring Tasks**: one-time, daily, weekly (pick weekdays), or
//!   monthly (pick a day of month) repetition
//! - **Multiple Interfaces**: full CLI for automation + interactive TUI
//!   board for visual management
//! - **Remote-First**: tasks live in the team's shared service; the client
//!   keeps a short-lived local cache that is invalidated on every creation
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI board for the configured group/list
//! tt ui
//!
//! # Create a weekly task via CLI
//! tt add "Water plants" --desc "Mon/Wed watering" --frequency weekly --on mon --on wed
//!
//! # Today's tasks
//! tt tasks
//!
//! # Comment on a task
//! tt comment 42 "done early"
//! ```
//!
//! Configuration lives in `~/.tt/config.json` (service URL, group, default
//! task list, optional bearer token); `TT_API_URL`, `TT_GROUP`, `TT_LIST`
//! and `TT_TOKEN` override it.

use std::path::Path;

use clap::Parser;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

pub mod cache;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod dates;
pub mod draft;
pub mod dto;
pub mod fields;
pub mod gateway;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod draft_form;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::Config;

fn main() {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let data_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("Failed to create data directory {}: {}", data_dir.display(), e);
        std::process::exit(1);
    }

    let mut config = Config::load(&config_path);
    config.apply_env();

    init_tracing(matches!(cli.command, Commands::Ui { .. }), &data_dir);

    let runtime = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Ui { group, list } => cmd_ui(&runtime, &config, group, list),

        Commands::Add {
            title, desc, start, frequency, week_days, month_day, group, list,
        } => cmd_add(
            &runtime, &config, title, desc, start, frequency, week_days, month_day, group, list,
        ),

        Commands::Tasks { date, group, list } => cmd_tasks(&runtime, &config, date, group, list),

        Commands::Lists { group } => cmd_lists(&runtime, &config, group),

        Commands::Comment { task_id, content } => cmd_comment(&runtime, &config, task_id, content),

        Commands::Completions { shell } => cmd_completions(shell),
    }
}

/// Set up the diagnostic log.
///
/// The TUI owns the terminal, so its diagnostics go to `~/.tt/tt.log`
/// instead of stderr. CLI commands log to stderr, quiet by default.
fn init_tracing(tui_mode: bool, data_dir: &Path) {
    if tui_mode {
        let log_path = data_dir.join("tt.log");
        match std::fs::File::create(&log_path) {
            Ok(file) => {
                let filter =
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false)
                    .init();
            }
            Err(e) => {
                eprintln!("Could not open {}: {e}; continuing without a log", log_path.display());
            }
        }
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
