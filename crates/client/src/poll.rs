//! Cancellable periodic polling of the traffic snapshot.
//!
//! [`TrafficPoller`] fetches the latest readings on a fixed interval
//! and publishes each snapshot wholesale through a watch channel -- a
//! single atomic replacement, no merging with the previous snapshot.
//! Cancellation is guaranteed on shutdown: the poll loop selects on a
//! [`CancellationToken`], so cancelling drops any in-flight fetch and a
//! response from a superseded generation is never applied.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use citylens_core::traffic::TrafficSensorReading;

use crate::traffic::TrafficApiClient;

/// One published traffic snapshot.
///
/// `generation` increments on every successful poll; consumers holding
/// an older snapshot can detect it has been superseded. Generation 0 is
/// the empty pre-first-poll snapshot.
#[derive(Debug, Clone, Default)]
pub struct TrafficSnapshot {
    pub generation: u64,
    /// When the snapshot was fetched; `None` until the first
    /// successful poll.
    pub fetched_at: Option<DateTime<Utc>>,
    pub readings: Vec<TrafficSensorReading>,
}

/// Periodic snapshot fetcher.
pub struct TrafficPoller {
    client: TrafficApiClient,
    interval: Duration,
}

impl TrafficPoller {
    pub fn new(client: TrafficApiClient, interval: Duration) -> Self {
        Self { client, interval }
    }

    /// Start polling. The first fetch happens immediately, then one per
    /// interval. Returns the snapshot receiver and the task handle; the
    /// task ends when `cancel` is cancelled.
    ///
    /// A failed poll keeps the previous snapshot in place -- stale data
    /// beats no data until the next tick succeeds.
    pub fn spawn(
        self,
        cancel: CancellationToken,
    ) -> (watch::Receiver<TrafficSnapshot>, JoinHandle<()>) {
        let (tx, rx) = watch::channel(TrafficSnapshot::default());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut generation: u64 = 0;

            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        tracing::debug!("Traffic poller cancelled");
                        break;
                    }
                    _ = ticker.tick() => {}
                }

                // Race the fetch against cancellation so shutdown drops
                // any in-flight request instead of applying its result.
                let result = tokio::select! {
                    () = cancel.cancelled() => {
                        tracing::debug!("Traffic poller cancelled mid-fetch");
                        break;
                    }
                    result = self.client.latest() => result,
                };

                match result {
                    Ok(readings) => {
                        generation += 1;
                        let snapshot = TrafficSnapshot {
                            generation,
                            fetched_at: Some(Utc::now()),
                            readings,
                        };
                        tracing::debug!(
                            generation,
                            sensors = snapshot.readings.len(),
                            "Published traffic snapshot"
                        );
                        if tx.send(snapshot).is_err() {
                            // All receivers dropped; nothing left to feed.
                            break;
                        }
                    }
                    Err(error) => {
                        tracing::warn!(%error, "Traffic poll failed, keeping previous snapshot");
                    }
                }
            }
        });

        (rx, handle)
    }
}
