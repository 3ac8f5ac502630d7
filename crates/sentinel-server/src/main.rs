//! Sentinel disease-surveillance API binary.
//!
//! Wires configuration, logging, and the persistence gateway into the HTTP
//! server and the summary poller.
//!
//! # Startup Sequence
//!
//! 1. Load `.env` into the process environment (if present)
//! 2. Initialize structured logging (tracing)
//! 3. Load configuration from `sentinel.toml` and the environment
//! 4. Connect to `PostgreSQL` (or fall back to the in-memory gateway)
//! 5. Optionally apply migrations
//! 6. Serve HTTP and poll for new summaries until `Ctrl-C` / `SIGTERM`

mod error;
mod settings;

use std::sync::Arc;

use sentinel_api::state::AppState;
use sentinel_api::{shutdown_signal, startup};
use sentinel_db::{Gateway, MemoryStore, PostgresPool};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;
use crate::settings::AppConfig;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, database setup, or the server fails.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Environment file, before the filter reads RUST_LOG.
    let dotenv = dotenvy::dotenv();

    // 2. Initialize structured logging.
    init_tracing();
    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Failed to read environment file"),
    }

    info!("sentinel-server starting");

    // 3. Load configuration.
    let config = AppConfig::load()?;
    let server_config = config.server_config()?;
    info!(
        host = config.host,
        port = config.port,
        poll_interval_secs = config.poll_interval_secs,
        static_dir = %config.static_dir.display(),
        "Configuration loaded"
    );

    // 4-5. Persistence gateway.
    let gateway = connect_gateway(&config).await?;
    let state = Arc::new(AppState::new(gateway.clone()));

    // 6. Serve until a shutdown signal arrives.
    startup::run(
        &server_config,
        state,
        config.poll_interval(),
        shutdown_signal(),
    )
    .await?;

    if let Gateway::Postgres(pool) = gateway {
        pool.close().await;
    }
    info!("sentinel-server stopped");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` (default `info`); `LOG_FORMAT=json`
/// switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Connect to `PostgreSQL` when a URL is configured, otherwise use memory.
async fn connect_gateway(config: &AppConfig) -> Result<Gateway, AppError> {
    let Some(settings) = config.pool_settings() else {
        warn!("DATABASE_URL is not set; using the in-memory gateway (data is not persisted)");
        return Ok(Gateway::Memory(MemoryStore::new()));
    };

    let pool = PostgresPool::connect(&settings).await?;

    if config.run_migrations {
        pool.run_migrations().await?;
        info!("Database migrations applied");
    }

    Ok(Gateway::Postgres(pool))
}
