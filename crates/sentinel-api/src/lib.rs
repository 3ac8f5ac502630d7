//! HTTP API for the Sentinel disease-surveillance service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** over hospital records, pharmacies, social posts,
//!   aggregated district summaries, and outbreak alerts
//! - **`WebSocket` endpoint** (`/ws/summaries`) streaming newly inserted
//!   summaries via [`tokio::sync::broadcast`]
//! - **Static files** from a configured directory for every other path
//!
//! # Architecture
//!
//! Handlers talk to storage only through the [`Gateway`](sentinel_db::Gateway)
//! held in [`AppState`]. The [`SummaryPoller`] is the single owner of the
//! change-detection cursor; it publishes [`RealtimeEvent`](sentinel_types::RealtimeEvent)s
//! on the broadcast channel that every `WebSocket` client subscribes to.
//! All responses use the envelopes in [`envelope`]; all failures go through
//! [`ApiError`].

pub mod envelope;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod poller;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use envelope::{ApiResponse, ErrorEnvelope};
pub use error::ApiError;
pub use poller::{DEFAULT_POLL_INTERVAL, SummaryPoller};
pub use router::build_router;
pub use server::{ServerConfig, ServerError, serve, shutdown_signal};
pub use state::AppState;
