//! Aggregate counters derived from the current snapshot

use serde::Serialize;

use crate::event::{Event, Status};

/// Dashboard counters, recomputed from the event list on every render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    /// Events still in `Detected`
    pub active_errors: usize,
    /// Events in `Resolved`
    pub self_healed: usize,
    /// Share of all events that are resolved, as a whole percentage
    pub success_rate: u32,
}

impl Metrics {
    pub fn from_events(events: &[Event]) -> Self {
        let active_errors = events.iter().filter(|e| e.status == Status::Detected).count();
        let self_healed = events.iter().filter(|e| e.status == Status::Resolved).count();

        Self {
            active_errors,
            self_healed,
            success_rate: success_rate(self_healed, events.len()),
        }
    }
}

/// `round(healed / total * 100)` with halves rounded up, or 0 for an empty list
pub fn success_rate(healed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let healed = healed.min(total) as u64;
    let total = total as u64;
    // floor(x + 0.5) in integer arithmetic
    ((healed * 200 + total) / (total * 2)) as u32
}
