//! `WebSocket` handler for realtime summary streaming.
//!
//! Clients connect to `GET /ws/summaries` and receive one JSON text frame
//! per [`RealtimeEvent`], e.g. `{"event":"new-summary","data":{...}}`.
//! Lagging clients skip ahead to the newest event.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use sentinel_types::RealtimeEvent;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade to a `WebSocket` and stream realtime events.
///
/// # Route
///
/// `GET /ws/summaries`
pub async fn ws_summaries(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Encode an event as a text frame.
///
/// # Errors
///
/// Returns the serializer error if the event cannot be encoded.
pub fn encode(event: &RealtimeEvent) -> Result<Message, serde_json::Error> {
    serde_json::to_string(event).map(|json| Message::Text(json.into()))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    let mut rx = state.subscribe();

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        let msg = match encode(&event) {
                            Ok(m) => m,
                            Err(e) => {
                                warn!(event = event.name(), "Failed to serialize realtime event: {e}");
                                continue;
                            }
                        };
                        if socket.send(msg).await.is_err() {
                            debug!("WebSocket client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        debug!(skipped = n, "WebSocket client lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => {
                        debug!("Broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    // Clients have nothing to say on this channel.
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sentinel_types::AggregatedSummary;

    #[test]
    fn frames_carry_event_name_and_data() {
        let now = Utc::now();
        let event = RealtimeEvent::NewSummary(AggregatedSummary {
            id: 7,
            district: String::from("Kamrup"),
            date: now,
            hospital_case_count: 3,
            severe_case_count: 1,
            pharma_sales_count: 0,
            social_posts_count: 2,
            negative_posts_count: 1,
            outbreak_risk_score: 0.42,
            alert_level: None,
            created_at: now,
        });

        let msg = encode(&event).unwrap();
        let json: serde_json::Value = serde_json::from_str(msg.to_text().unwrap()).unwrap();
        assert_eq!(json["event"], "new-summary");
        assert_eq!(json["data"]["district"], "Kamrup");
        assert_eq!(json["data"]["id"], 7);
    }
}
