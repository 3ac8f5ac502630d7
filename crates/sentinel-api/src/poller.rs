//! Periodic change detection for aggregated summaries.
//!
//! [`SummaryPoller`] owns the cursor `last_checked`. Each cycle reads the
//! summaries inserted in `[last_checked, now)`, publishes each one as a
//! [`RealtimeEvent::NewSummary`], and advances the cursor to `now`. A row
//! is therefore published exactly once across consecutive cycles.
//!
//! The poller runs as a single task driven by a [`tokio::time::interval`]
//! with [`MissedTickBehavior::Delay`], so cycles never overlap.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sentinel_db::DbError;
use sentinel_types::RealtimeEvent;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Default time between poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(50);

/// Shortest accepted poll interval.
const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Polls the gateway for new summaries and broadcasts them.
pub struct SummaryPoller {
    state: Arc<AppState>,
    interval: Duration,
    last_checked: DateTime<Utc>,
}

impl SummaryPoller {
    /// Create a poller whose cursor starts at the current time.
    ///
    /// Intervals below one second are raised to one second.
    pub fn new(state: Arc<AppState>, interval: Duration) -> Self {
        Self::with_cursor(state, interval, Utc::now())
    }

    /// Create a poller with an explicit starting cursor.
    pub fn with_cursor(
        state: Arc<AppState>,
        interval: Duration,
        last_checked: DateTime<Utc>,
    ) -> Self {
        Self {
            state,
            interval: interval.max(MIN_POLL_INTERVAL),
            last_checked,
        }
    }

    /// The exclusive lower bound of the next window.
    pub const fn last_checked(&self) -> DateTime<Utc> {
        self.last_checked
    }

    /// The effective interval between cycles.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one cycle ending at the current time.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the cursor is left unchanged so the next
    /// cycle retries the same window.
    pub async fn poll_once(&mut self) -> Result<usize, DbError> {
        self.poll_at(Utc::now()).await
    }

    /// Run one cycle over `[last_checked, now)`.
    ///
    /// Returns the number of summaries published.
    ///
    /// # Errors
    ///
    /// Returns the gateway error without advancing the cursor.
    pub async fn poll_at(&mut self, now: DateTime<Utc>) -> Result<usize, DbError> {
        let rows = self
            .state
            .gateway
            .summaries_created_between(self.last_checked, now)
            .await?;

        let published = rows.len();
        for summary in rows {
            let receivers = self.state.broadcast(RealtimeEvent::NewSummary(summary));
            debug!(receivers, "Published new summary");
        }

        self.last_checked = now;
        Ok(published)
    }

    /// Run the poll loop on a background task until `shutdown` flips to
    /// `true` or its sender is dropped.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        info!(
            interval_secs = self.interval.as_secs(),
            "Summary poller started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.poll_once().await {
                        Ok(0) => {}
                        Ok(n) => info!(count = n, "Broadcast new summaries"),
                        Err(e) => warn!(error = %e, "Summary poll failed; retrying window next cycle"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Summary poller stopped");
    }
}
