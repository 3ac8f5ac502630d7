//! Shared application state.
//!
//! [`AppState`] carries the persistence gateway used by every handler and
//! the broadcast channel the poller publishes new summaries on.

use sentinel_db::Gateway;
use sentinel_types::RealtimeEvent;
use tokio::sync::broadcast;

/// Capacity of the realtime broadcast channel.
///
/// A subscriber that falls further behind receives
/// [`broadcast::error::RecvError::Lagged`] and skips to the newest event.
const BROADCAST_CAPACITY: usize = 256;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway.
    pub gateway: Gateway,
    /// Broadcast sender for realtime events.
    pub tx: broadcast::Sender<RealtimeEvent>,
}

impl AppState {
    /// Create application state around a gateway.
    pub fn new(gateway: Gateway) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { gateway, tx }
    }

    /// Subscribe to realtime events.
    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to every connected subscriber.
    ///
    /// Returns the number of receivers reached; 0 when nobody is listening.
    pub fn broadcast(&self, event: RealtimeEvent) -> usize {
        // send only fails when there are no receivers.
        self.tx.send(event).unwrap_or(0)
    }
}
