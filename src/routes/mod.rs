//! HTTP route handlers.
//!
//! The probe routes carry no Cache-Control header so every check reaches the
//! process; the OpenAPI document and static frontend get public cache headers.
//! Unknown paths and unsupported methods answer with JSON error bodies.
//!
//! Request tracing is enabled via middleware that assigns a unique request ID
//! to each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod openapi;
pub mod ping;

use axum::{middleware, response::Response, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_OPENAPI, CACHE_CONTROL_STATIC};
use crate::error::AppError;
use crate::http::static_files::create_static_service;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Fallback for paths no route matches.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Fallback for a known path requested with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Probes - no caching, always fresh for liveness checks
    let probe_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api/ping", get(ping::ping));

    let openapi_routes = Router::new()
        .route("/openapi.json", get(openapi::openapi_json))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_OPENAPI),
        ));

    let mut router = Router::new().merge(probe_routes).merge(openapi_routes);

    // Static frontend - only mounted when a directory is configured.
    // Long cache for served files only; error fallbacks stay uncached.
    if let Some(dir) = &state.config.frontend.dir {
        let static_routes = Router::new()
            .nest_service(
                &state.config.frontend.mount,
                create_static_service(dir),
            )
            .layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                |response: &Response| {
                    response
                        .status()
                        .is_success()
                        .then(|| HeaderValue::from_static(CACHE_CONTROL_STATIC))
                },
            ));
        router = router.merge(static_routes);
    }

    router
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
