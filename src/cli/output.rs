//! Output formatting utilities for CLI

use serde::Serialize;

use crate::view::{DashboardView, LOADING_PLACEHOLDER, RowView};

/// Widest the workflow column may get before truncation
const MAX_WORKFLOW_WIDTH: usize = 28;
/// Widest the error column may get before truncation
const MAX_ERROR_WIDTH: usize = 60;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a serializable value as JSON or use custom text formatter
pub fn print_formatted<T, F>(value: &T, format: OutputFormat, text_formatter: F)
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => println!("{}", text_formatter(value)),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a success message (suppressed in quiet mode)
pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// Print an error message (never suppressed)
pub fn print_error(message: &str) {
    eprintln!("Error: {}", message);
}

/// Shorten `text` to at most `max` characters, marking the cut with "..."
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Render the dashboard as plain text: metrics line, then the event table
pub fn format_dashboard(view: &DashboardView) -> String {
    let loaded = match view {
        DashboardView::Loading => return LOADING_PLACEHOLDER.to_string(),
        DashboardView::Loaded(loaded) => loaded,
    };

    let m = loaded.metrics;
    let mut lines = vec![format!(
        "Active Errors: {}   Self-Healed: {}   Success Rate: {}%",
        m.active_errors, m.self_healed, m.success_rate
    )];

    if let Some(staleness) = &loaded.staleness {
        lines.push(staleness.to_string());
    }

    lines.push(String::new());
    lines.extend(format_table(&loaded.rows));
    lines.join("\n")
}

fn format_table(rows: &[RowView]) -> Vec<String> {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            let mut action = row.action.unwrap_or("").to_string();
            if row.fix_attempted && row.action.is_some() {
                action.push_str(" *");
            }
            [
                row.time.clone(),
                truncate(&row.workflow, MAX_WORKFLOW_WIDTH),
                truncate(&row.error, MAX_ERROR_WIDTH),
                row.status.to_string(),
                action,
            ]
        })
        .collect();

    let headers = ["TIME", "WORKFLOW", "ERROR", "STATUS", "ACTION"];
    let mut widths = headers.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let join = |values: [&str; 5]| -> String {
        let padded: Vec<String> = values
            .iter()
            .zip(widths)
            .map(|(value, width)| format!("{:<width$}", value, width = width))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut lines = vec![join(headers)];
    if cells.is_empty() {
        lines.push("(no events)".to_string());
    }
    for row in &cells {
        lines.push(join([&row[0], &row[1], &row[2], &row[3], &row[4]]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::event::{Event, EventId, Status};
    use crate::feed::FeedError;
    use crate::poller::FetchOutcome;
    use crate::state::ViewState;
    use chrono::{TimeZone, Utc};

    fn event(id: i64, workflow: &str, status: Status) -> Event {
        Event {
            id: EventId::Number(id),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).single(),
            workflow_name: workflow.to_string(),
            error: "ECONNRESET".to_string(),
            status,
            fix_attempted: false,
        }
    }

    fn render(result: Result<Vec<Event>, FeedError>) -> String {
        let mut state = ViewState::default();
        state.apply(FetchOutcome { seq: 1, result });
        format_dashboard(&DashboardView::build_in(&state, &DisplayConfig::default(), &Utc))
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("a much longer message", 10), "a much ...");
        // Counts characters, not bytes
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn test_loading_placeholder() {
        assert_eq!(format_dashboard(&DashboardView::Loading), LOADING_PLACEHOLDER);
    }

    #[test]
    fn test_empty_feed() {
        let text = render(Ok(vec![]));
        assert!(text.starts_with("Active Errors: 0   Self-Healed: 0   Success Rate: 0%"));
        assert!(text.contains("(no events)"));
        assert!(!text.contains(LOADING_PLACEHOLDER));
    }

    #[test]
    fn test_failed_first_fetch_renders_empty_table() {
        let text = render(Err(FeedError::Io(std::io::Error::other("refused"))));
        assert!(text.contains("(no events)"));
        assert!(!text.contains(LOADING_PLACEHOLDER));
    }

    #[test]
    fn test_rows_and_columns() {
        let text = render(Ok(vec![
            event(1, "Invoice Sync", Status::Resolved),
            event(2, "Lead Router", Status::Detected),
            event(3, "Nightly Export", Status::Other("Queued".to_string())),
        ]));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Active Errors: 1   Self-Healed: 1   Success Rate: 33%");
        assert!(lines[2].starts_with("TIME      WORKFLOW"));
        assert!(lines[3].starts_with("09:26:53  Invoice Sync"));
        assert!(lines[3].ends_with("Resolved  Refactored"));
        assert!(lines[4].ends_with("Detected  Analyzing..."));
        // Unknown status: shown, no action
        assert!(lines[5].ends_with("Queued"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let events = vec![
            event(1, "Invoice Sync", Status::Resolved),
            event(2, "Lead Router", Status::Detected),
        ];
        let mut state = ViewState::default();
        state.apply(FetchOutcome {
            seq: 1,
            result: Ok(events),
        });
        let display = DisplayConfig::default();

        let first = format_dashboard(&DashboardView::build_in(&state, &display, &Utc));
        let second = format_dashboard(&DashboardView::build_in(&state, &display, &Utc));
        assert_eq!(first, second);
    }
}
