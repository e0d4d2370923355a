//! One-shot fetch and render

use anyhow::{Context, Result};

use crate::cli::output::{OutputFormat, format_dashboard, print_formatted};
use crate::config::Config;
use crate::feed;
use crate::poller::FetchOutcome;
use crate::state::ViewState;
use crate::view::DashboardView;

pub async fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let source = feed::source_for(&config.feed)?;

    let events = source
        .fetch()
        .await
        .with_context(|| format!("Failed to fetch events from {}", source.describe()))?;

    let mut state = ViewState::default();
    for event in state.apply(FetchOutcome {
        seq: 1,
        result: Ok(events),
    }) {
        event.log();
    }

    let view = DashboardView::build(&state, &config.display);
    print_formatted(&view, format, format_dashboard);

    Ok(())
}
