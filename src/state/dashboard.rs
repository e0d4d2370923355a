//! A mounted dashboard: snapshot plus the poller that feeds it

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::feed::EventSource;
use crate::poller::{FetchOutcome, Poller};
use crate::state::{StateEvent, ViewState};

/// Dashboard state with an explicit lifetime.
///
/// Creating it mounts the dashboard and starts polling. Dropping it unmounts:
/// the timer stops, in-flight fetches are aborted, and since the snapshot
/// goes away with it nothing can be written after that point.
pub struct DashboardState {
    view: ViewState,
    outcomes: mpsc::UnboundedReceiver<FetchOutcome>,
    source: String,
    _poller: Poller,
}

impl DashboardState {
    /// Mount a dashboard polling `source` every `period`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount<F>(source: Arc<dyn EventSource>, period: Duration, on_outcome: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let label = source.describe();
        let (poller, outcomes) = Poller::spawn(source, period, on_outcome);
        tracing::info!("Dashboard mounted on {}", label);

        Self {
            view: ViewState::default(),
            outcomes,
            source: label,
            _poller: poller,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Where events are read from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Apply every outcome that has arrived since the last call, without waiting
    pub fn poll(&mut self) -> Vec<StateEvent> {
        let mut events = Vec::new();
        loop {
            match self.outcomes.try_recv() {
                Ok(outcome) => events.extend(self.view.apply(outcome)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("Poll loop ended unexpectedly");
                    break;
                }
            }
        }
        events
    }

    /// Wait for the next outcome and apply it.
    ///
    /// Returns `None` once the poll loop has ended.
    pub async fn next(&mut self) -> Option<Vec<StateEvent>> {
        let outcome = self.outcomes.recv().await?;
        Some(self.view.apply(outcome))
    }
}

impl Drop for DashboardState {
    fn drop(&mut self) {
        tracing::info!("Dashboard unmounted from {}", self.source);
    }
}
