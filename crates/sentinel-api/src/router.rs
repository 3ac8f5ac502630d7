//! Axum router construction.
//!
//! Assembles the REST routes, the `WebSocket` endpoint, and the static file
//! fallback into a single [`Router`] with body limit, CORS, and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::handler::HandlerWithoutStateExt;
use axum::http::Method;
use axum::routing::get;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, alerts, hospital, pharma, social, summary};
use crate::server::ServerConfig;
use crate::state::AppState;
use crate::ws;

/// Maximum accepted request body size (16 KiB).
pub const BODY_LIMIT_BYTES: usize = 16_384;

/// Build the complete router.
///
/// The router includes:
/// - `GET /api/hospital`, `GET /api/hospital/{id}`
/// - `GET|POST /api/pharma`, `GET|PUT|DELETE /api/pharma/{id}`
/// - `GET|POST /api/social`, `GET|PUT|DELETE /api/social/{id}`
/// - `GET /api/summary`, `GET /api/summary/latest`,
///   `GET /api/summary/district/{district}`
/// - `GET /api/alerts`
/// - `GET /ws/summaries` -- realtime summary stream
/// - a known path with an unsupported method -- 405 envelope
/// - everything else -- static files from `config.static_dir`, then a 404
///   envelope
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let static_files = ServeDir::new(&config.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(handlers::route_not_found.into_service());

    Router::new()
        // Hospital records
        .route("/api/hospital", get(hospital::list))
        .route("/api/hospital/{id}", get(hospital::get))
        // Pharmacies
        .route("/api/pharma", get(pharma::list).post(pharma::create))
        .route(
            "/api/pharma/{id}",
            get(pharma::get).put(pharma::update).delete(pharma::delete),
        )
        // Social posts
        .route("/api/social", get(social::list).post(social::create))
        .route(
            "/api/social/{id}",
            get(social::get).put(social::update).delete(social::delete),
        )
        // Aggregated summaries
        .route("/api/summary", get(summary::list))
        .route("/api/summary/latest", get(summary::latest))
        .route(
            "/api/summary/district/{district}",
            get(summary::district_trend),
        )
        .route("/api/alerts", get(alerts::list))
        // WebSocket
        .route("/ws/summaries", get(ws::ws_summaries))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS: the configured origin, or the request origin mirrored when none
/// is configured. Credentials are allowed, so headers are mirrored too.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = config
        .cors_origin
        .clone()
        .map_or_else(AllowOrigin::mirror_request, AllowOrigin::exact);

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
