//! HTTP service in front of the swing analysis pipeline.
//!
//! Exposes a liveness probe, the (not yet implemented) analysis endpoint,
//! its OpenAPI document, and Prometheus metrics, with structured logging
//! via tracing.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Creates the Axum application router.
///
/// The router holds no state of its own; the metrics handle is only
/// reachable from `/metrics`.
pub fn create_app(metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/v1/analysis", post(routes::analysis::request))
        .route("/openapi.json", get(routes::openapi::get))
        .merge(metrics_router)
        .fallback(routes::fallback::not_found)
        .method_not_allowed_fallback(routes::fallback::method_not_allowed)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
