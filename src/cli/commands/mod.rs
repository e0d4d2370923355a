//! CLI subcommand implementations

pub mod config;
pub mod snapshot;
pub mod watch;
