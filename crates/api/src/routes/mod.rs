//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Readiness banner
//! GET  /test              - Storage diagnostics
//! GET  /health            - Liveness check
//! GET  /health/ready      - Readiness check (storage reachable)
//!
//! # Leads
//! POST /api/lead          - Submit a contact/demo request
//!
//! # CMS (read only, sorted by `order`)
//! GET  /api/faqs          - FAQ entries
//! GET  /api/sections      - Landing page sections
//! GET  /api/trust-badges  - Trust badges
//! ```

pub mod cms;
pub mod diagnostics;
pub mod health;
pub mod home;
pub mod lead;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{cors_layer, request_id_middleware};
use crate::state::AppState;

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/lead", post(lead::create_lead))
        .route("/faqs", get(cms::faqs))
        .route("/sections", get(cms::sections))
        .route("/trust-badges", get(cms::trust_badges))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/test", get(diagnostics::test_database))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}

/// Build the application with its middleware stack and state.
///
/// Sentry layers are added by the binary so tests and embedders can run the
/// router without a Sentry hub.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(cors_layer())
        .with_state(state)
}
