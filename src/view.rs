//! Render-ready view of the snapshot.
//!
//! Both the desktop dashboard and the terminal output render from
//! `DashboardView`, so they always agree on what is shown: a placeholder while
//! loading, otherwise the metric cards and one row per event in feed order.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::fmt;

use crate::config::DisplayConfig;
use crate::event::{Event, EventId, Status};
use crate::metrics::Metrics;
use crate::state::ViewState;

/// Text shown until the first fetch attempt completes
pub const LOADING_PLACEHOLDER: &str = "Initializing Neural Link...";

/// What the dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DashboardView {
    Loading,
    Loaded(LoadedView),
}

/// Everything shown once the first fetch has completed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedView {
    pub metrics: Metrics,
    pub rows: Vec<RowView>,
    /// Only present when the staleness indicator is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staleness: Option<Staleness>,
}

/// One table row, keyed by its event id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub key: EventId,
    pub time: String,
    pub workflow: String,
    pub error: String,
    pub status: Status,
    pub action: Option<&'static str>,
    pub fix_attempted: bool,
}

/// How old the displayed snapshot is
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Staleness {
    pub last_success: Option<DateTime<Local>>,
    pub failures: u32,
}

impl Staleness {
    /// Whether polls have failed since the snapshot was taken
    pub fn is_stale(&self) -> bool {
        self.failures > 0
    }
}

impl fmt::Display for Staleness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last_success {
            Some(at) => write!(f, "Last update {}", at.format("%H:%M:%S"))?,
            None => f.write_str("No successful update yet")?,
        }
        if self.failures > 0 {
            write!(f, " ({} failed since)", self.failures)?;
        }
        Ok(())
    }
}

impl RowView {
    fn from_event<Tz>(event: &Event, tz: &Tz, time_format: &str) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            key: event.id.clone(),
            time: event.time_of_day_in(tz, time_format),
            workflow: event.workflow_name.clone(),
            error: event.error.clone(),
            status: event.status.clone(),
            action: event.status.action(),
            fix_attempted: event.fix_attempted,
        }
    }
}

impl DashboardView {
    /// Build the view with times shown in the local timezone
    pub fn build(state: &ViewState, display: &DisplayConfig) -> Self {
        Self::build_in(state, display, &Local)
    }

    /// Build the view with times shown in `tz`
    pub fn build_in<Tz>(state: &ViewState, display: &DisplayConfig, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        if state.loading() {
            return DashboardView::Loading;
        }

        let events = state.events();
        let rows = events
            .iter()
            .map(|e| RowView::from_event(e, tz, &display.time_format))
            .collect();

        let staleness = display.show_staleness.then(|| Staleness {
            last_success: state.last_success(),
            failures: state.failures_since_success(),
        });

        DashboardView::Loaded(LoadedView {
            metrics: Metrics::from_events(events),
            rows,
            staleness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedError;
    use crate::poller::FetchOutcome;
    use chrono::Utc;

    fn event(id: &str, status: Status, hour: u32) -> Event {
        Event {
            id: EventId::Text(id.to_string()),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 14, hour, 0, 0).single(),
            workflow_name: format!("Workflow {}", id),
            error: "timeout".to_string(),
            status,
            fix_attempted: false,
        }
    }

    fn loaded_with(events: Vec<Event>) -> ViewState {
        let mut state = ViewState::default();
        state.apply(FetchOutcome {
            seq: 1,
            result: Ok(events),
        });
        state
    }

    fn loaded(view: DashboardView) -> LoadedView {
        match view {
            DashboardView::Loaded(v) => v,
            DashboardView::Loading => panic!("expected loaded view"),
        }
    }

    #[test]
    fn test_loading_shows_placeholder_only() {
        let view = DashboardView::build_in(&ViewState::default(), &DisplayConfig::default(), &Utc);
        assert_eq!(view, DashboardView::Loading);
    }

    #[test]
    fn test_rows_follow_feed_order() {
        let state = loaded_with(vec![
            event("z", Status::Resolved, 9),
            event("a", Status::Detected, 8),
            event("m", Status::Other("Queued".to_string()), 10),
        ]);
        let view = loaded(DashboardView::build_in(&state, &DisplayConfig::default(), &Utc));

        let keys: Vec<String> = view.rows.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(view.rows[0].time, "09:00:00");
        assert_eq!(view.rows[0].action, Some("Refactored"));
        assert_eq!(view.rows[1].action, Some("Analyzing..."));
        assert_eq!(view.rows[2].action, None);
        assert!(view.staleness.is_none());
    }

    #[test]
    fn test_single_detected_row() {
        let state = loaded_with(vec![event("1", Status::Detected, 12)]);
        let view = loaded(DashboardView::build_in(&state, &DisplayConfig::default(), &Utc));

        assert_eq!(view.metrics.active_errors, 1);
        assert_eq!(view.metrics.self_healed, 0);
        assert_eq!(view.metrics.success_rate, 0);
        assert_eq!(view.rows[0].action, Some("Analyzing..."));
    }

    #[test]
    fn test_failed_first_fetch_renders_empty_table() {
        let mut state = ViewState::default();
        state.apply(FetchOutcome {
            seq: 1,
            result: Err(FeedError::Io(std::io::Error::other("refused"))),
        });

        let view = loaded(DashboardView::build_in(&state, &DisplayConfig::default(), &Utc));
        assert!(view.rows.is_empty());
        assert_eq!(view.metrics, Metrics::default());
    }

    #[test]
    fn test_staleness_only_when_enabled() {
        let mut state = loaded_with(vec![]);
        state.apply(FetchOutcome {
            seq: 2,
            result: Err(FeedError::Io(std::io::Error::other("refused"))),
        });

        let display = DisplayConfig {
            show_staleness: true,
            ..DisplayConfig::default()
        };
        let view = loaded(DashboardView::build_in(&state, &display, &Utc));
        let staleness = view.staleness.unwrap();
        assert!(staleness.is_stale());
        assert!(staleness.last_success.is_some());
        assert!(staleness.to_string().ends_with("(1 failed since)"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let state = loaded_with(vec![event("1", Status::Resolved, 1), event("2", Status::Detected, 2)]);
        let display = DisplayConfig::default();
        assert_eq!(
            DashboardView::build_in(&state, &display, &Utc),
            DashboardView::build_in(&state, &display, &Utc)
        );
    }

    #[test]
    fn test_json_shape() {
        let state = loaded_with(vec![event("1", Status::Detected, 7)]);
        let view = DashboardView::build_in(&state, &DisplayConfig::default(), &Utc);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["state"], "loaded");
        assert_eq!(json["metrics"]["active_errors"], 1);
        assert_eq!(json["rows"][0]["key"], "1");
        assert_eq!(json["rows"][0]["status"], "Detected");
        assert_eq!(json["rows"][0]["action"], "Analyzing...");

        let json = serde_json::to_value(DashboardView::Loading).unwrap();
        assert_eq!(json["state"], "loading");
    }
}
