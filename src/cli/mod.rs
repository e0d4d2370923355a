//! CLI module for Healwatch
//!
//! Running without a subcommand opens the desktop dashboard; the subcommands
//! render the same dashboard in the terminal or manage configuration.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, FeedConfig};

pub use output::{OutputFormat, print_error};

/// Healwatch - self-healing workflow dashboard
#[derive(Parser, Debug)]
#[command(name = "healwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    /// Feed overrides
    #[command(flatten)]
    pub feed: FeedOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Per-run overrides of the `[feed]` config section (not saved)
#[derive(Parser, Debug, Clone, Default)]
pub struct FeedOptions {
    /// Feed URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Read events from a local file instead of a URL
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Milliseconds between polls
    #[arg(long, global = true)]
    pub interval_ms: Option<u64>,
}

impl FeedOptions {
    /// Apply the given overrides on top of the loaded config
    pub fn apply(&self, feed: &mut FeedConfig) {
        if let Some(url) = &self.url {
            feed.url = url.clone();
            // An explicit URL beats a configured file
            if self.file.is_none() {
                feed.file = None;
            }
        }
        if let Some(file) = &self.file {
            feed.file = Some(file.clone());
        }
        if let Some(ms) = self.interval_ms {
            feed.poll_interval_ms = ms;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the feed once and print the dashboard
    Snapshot,

    /// Live dashboard in the terminal, redrawn on every poll
    Watch,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run a CLI subcommand against the effective configuration
pub async fn run(command: Commands, config: Config, output: &OutputOptions) -> anyhow::Result<()> {
    let format = output.format();
    let quiet = output.quiet;

    match command {
        Commands::Snapshot => commands::snapshot::run(&config, format).await,
        Commands::Watch => commands::watch::run(&config, format, quiet).await,
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
    }
}
