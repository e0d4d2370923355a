//! The in-memory snapshot behind the dashboard

use chrono::{DateTime, Local};

use crate::event::Event;
use crate::poller::FetchOutcome;
use crate::state::StateEvent;

/// Snapshot state.
///
/// `events` only changes by wholesale replacement from a successful fetch.
/// `loading` starts true and drops to false on the first completed fetch
/// attempt, whatever its result, and never goes back.
#[derive(Debug, Clone)]
pub struct ViewState {
    events: Vec<Event>,
    loading: bool,
    /// Sequence number of the fetch that produced `events` (0 = none yet)
    published_seq: u64,
    last_success: Option<DateTime<Local>>,
    /// Sequence numbers of failed fetches started after `published_seq`
    failed_after_publish: Vec<u64>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            loading: true,
            published_seq: 0,
            last_success: None,
            failed_after_publish: Vec::new(),
        }
    }
}

impl ViewState {
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// When the displayed snapshot was fetched
    pub fn last_success(&self) -> Option<DateTime<Local>> {
        self.last_success
    }

    /// Failed fetches newer than the displayed snapshot
    pub fn failures_since_success(&self) -> u32 {
        self.failed_after_publish.len() as u32
    }

    /// Fold one fetch outcome into the snapshot
    pub fn apply(&mut self, outcome: FetchOutcome) -> Vec<StateEvent> {
        let mut events = Vec::new();

        if self.loading {
            self.loading = false;
            events.push(StateEvent::FirstLoadComplete);
        }

        if outcome.seq < self.published_seq {
            // Overtaken by a fetch that started later; its result, good or bad, is moot
            events.push(StateEvent::StaleDiscarded { seq: outcome.seq });
            return events;
        }

        match outcome.result {
            Ok(list) => {
                let count = list.len();
                self.events = list;
                self.published_seq = outcome.seq;
                self.last_success = Some(Local::now());
                // Failures of fetches started later still postdate this snapshot
                self.failed_after_publish.retain(|&seq| seq > outcome.seq);
                events.push(StateEvent::SnapshotReplaced { count });
            }
            Err(e) => {
                self.failed_after_publish.push(outcome.seq);
                events.push(StateEvent::FetchFailed(e.to_string()));
            }
        }

        events
    }
}
