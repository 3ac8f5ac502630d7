//! Runs the HTTP server and the summary poller side by side.
//!
//! [`run`] spawns the [`SummaryPoller`] on a background task, serves HTTP
//! until the shutdown future resolves, then stops the poller and waits for
//! it to finish.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::poller::SummaryPoller;
use crate::server::{ServerConfig, ServerError, serve};
use crate::state::AppState;

/// Errors that can occur while running the service.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or serve.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}

/// Serve HTTP and poll for new summaries until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the server cannot bind or fails
/// while serving. The poller is stopped in either case.
pub async fn run<F>(
    config: &ServerConfig,
    state: Arc<AppState>,
    poll_interval: Duration,
    shutdown: F,
) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = watch::channel(false);
    let poller = SummaryPoller::new(Arc::clone(&state), poll_interval).spawn(stop_rx);

    info!(
        backend = state.gateway.backend(),
        poll_interval_secs = poll_interval.as_secs(),
        "Starting Sentinel API"
    );

    let served = serve(config, state, shutdown).await;

    // Receivers may already be gone if the poller exited; nothing to stop then.
    let _ = stop_tx.send(true);
    if let Err(e) = poller.await {
        warn!(error = %e, "Summary poller task ended abnormally");
    }

    served.map_err(StartupError::from)
}
