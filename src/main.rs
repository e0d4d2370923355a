mod app;
mod cli;
mod config;
mod event;
mod feed;
mod metrics;
mod poller;
mod state;
mod ui;
mod view;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps terminal output on stdout clean
    let default_filter = if cli.output.verbose {
        "healwatch=trace,info"
    } else {
        "healwatch=debug,info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    cli.feed.apply(&mut config.feed);

    match cli.command {
        Some(command) => {
            if let Err(e) = cli::run(command, config, &cli.output).await {
                cli::print_error(&format!("{:#}", e));
                std::process::exit(1);
            }
            Ok(())
        }
        None => run_gui(config),
    }
}

fn run_gui(config: Config) -> Result<()> {
    tracing::info!("Starting Healwatch dashboard");

    let source = feed::source_for(&config.feed)?;

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1000.0, 700.0])
        .with_min_inner_size([720.0, 420.0])
        .with_title("Healwatch");

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Healwatch",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::HealwatchApp::new(cc, config, source)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
