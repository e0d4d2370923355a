//! Application state modules
//!
//! `ViewState` is the snapshot the dashboard renders. `DashboardState` is a
//! mounted dashboard: the snapshot plus the poller feeding it. `UiState` holds
//! purely presentational state for the desktop window.

mod dashboard;
mod ui;
mod view;

pub use dashboard::DashboardState;
pub use ui::UiState;
pub use view::ViewState;

/// Events that applying a fetch outcome can produce.
/// These communicate results back to the caller without direct mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// The first fetch attempt finished; the loading placeholder is gone
    FirstLoadComplete,

    /// A newer snapshot replaced the displayed one
    SnapshotReplaced { count: usize },

    /// A fetch failed; the previous snapshot stays on screen
    FetchFailed(String),

    /// A fetch finished after a newer one had already been published
    StaleDiscarded { seq: u64 },
}

impl StateEvent {
    /// Write this event to the log at the matching level
    pub fn log(&self) {
        match self {
            StateEvent::FirstLoadComplete => tracing::info!("Initial fetch completed"),
            StateEvent::SnapshotReplaced { count } => {
                tracing::debug!("Snapshot replaced with {} events", count)
            }
            StateEvent::FetchFailed(msg) => tracing::warn!("Failed to fetch events: {}", msg),
            StateEvent::StaleDiscarded { seq } => {
                tracing::debug!("Discarded out-of-order result of fetch #{}", seq)
            }
        }
    }

    /// Text for the status bar, if this event changes it
    pub fn status_message(&self) -> Option<String> {
        match self {
            StateEvent::SnapshotReplaced { count } => Some(format!("Fetched {} events", count)),
            _ => None,
        }
    }
}
