//! Feed polling.
//!
//! A `Poller` owns one repeating timer running on the tokio runtime. Each tick
//! starts an independent fetch; fetches may overlap. Completed fetches are sent
//! down a channel tagged with the sequence number of the tick that started
//! them, so the receiver can tell which snapshot is newest.
//!
//! Dropping the `Poller` stops the timer and aborts every fetch still in
//! flight. Nothing is delivered after that point.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

use crate::event::Event;
use crate::feed::{EventSource, FeedError};

/// Result of one fetch attempt
#[derive(Debug)]
pub struct FetchOutcome {
    /// Order in which the fetch was started, from 1
    pub seq: u64,
    pub result: Result<Vec<Event>, FeedError>,
}

/// Handle to a running poll loop
pub struct Poller {
    timer: JoinHandle<()>,
}

impl Poller {
    /// Start polling `source` now and then every `period`.
    ///
    /// `on_outcome` runs after each outcome is queued; the GUI uses it to
    /// request a repaint.
    pub fn spawn<F>(
        source: Arc<dyn EventSource>,
        period: Duration,
        on_outcome: F,
    ) -> (Self, mpsc::UnboundedReceiver<FetchOutcome>)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tracing::debug!("Polling {} every {:?}", source.describe(), period);
        let timer = tokio::spawn(run(source, period, tx, on_outcome));
        (Self { timer }, rx)
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        // Aborting the loop drops its JoinSet, which aborts in-flight fetches
        self.timer.abort();
        tracing::debug!("Poller stopped");
    }
}

async fn run<F>(
    source: Arc<dyn EventSource>,
    period: Duration,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    on_outcome: F,
) where
    F: Fn() + Send + Sync + 'static,
{
    // First tick completes immediately, giving the fetch on mount
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut in_flight: JoinSet<FetchOutcome> = JoinSet::new();
    let mut next_seq = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                next_seq += 1;
                let seq = next_seq;
                let source = Arc::clone(&source);
                tracing::trace!("Starting fetch #{}", seq);
                in_flight.spawn(async move {
                    let result = source.fetch().await;
                    FetchOutcome { seq, result }
                });
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                match joined {
                    Ok(outcome) => {
                        if tx.send(outcome).is_err() {
                            tracing::debug!("Outcome receiver dropped, stopping poll loop");
                            return;
                        }
                        on_outcome();
                    }
                    Err(e) => tracing::error!("Fetch task panicked: {}", e),
                }
            }
            _ = tx.closed() => {
                tracing::debug!("Outcome receiver dropped, stopping poll loop");
                return;
            }
        }
    }
}
