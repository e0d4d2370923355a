//! Live terminal dashboard

use anyhow::Result;
use std::io::Write;

use crate::cli::output::{OutputFormat, format_dashboard};
use crate::config::Config;
use crate::feed;
use crate::state::DashboardState;
use crate::view::DashboardView;

/// ANSI: clear screen and move the cursor home
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub async fn run(config: &Config, format: OutputFormat, quiet: bool) -> Result<()> {
    let source = feed::source_for(&config.feed)?;
    let mut dashboard = DashboardState::mount(source, config.feed.poll_interval(), || {});

    draw(&dashboard, config, format, quiet)?;

    // Subscribed once so an interrupt during a redraw is not lost
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        tokio::select! {
            _ = &mut interrupted => {
                tracing::info!("Interrupted, stopping watch");
                break;
            }
            next = dashboard.next() => {
                let Some(events) = next else {
                    anyhow::bail!("Poll loop ended unexpectedly");
                };
                for event in &events {
                    event.log();
                }
                draw(&dashboard, config, format, quiet)?;
            }
        }
    }

    // Unmount before returning so no fetch outlives the command
    drop(dashboard);
    Ok(())
}

fn draw(dashboard: &DashboardState, config: &Config, format: OutputFormat, quiet: bool) -> Result<()> {
    let view = DashboardView::build(dashboard.view(), &config.display);
    let mut stdout = std::io::stdout().lock();

    match format {
        // One compact document per update, so the stream can be piped
        OutputFormat::Json => {
            if matches!(view, DashboardView::Loaded(_)) {
                writeln!(stdout, "{}", serde_json::to_string(&view)?)?;
            }
        }
        OutputFormat::Text => {
            write!(stdout, "{}", CLEAR_SCREEN)?;
            writeln!(stdout, "{}", format_dashboard(&view))?;
            if !quiet {
                writeln!(
                    stdout,
                    "\nWatching {} every {}s. Press Ctrl-C to quit.",
                    dashboard.source(),
                    config.feed.poll_interval().as_secs_f64()
                )?;
            }
        }
    }

    stdout.flush()?;
    Ok(())
}
