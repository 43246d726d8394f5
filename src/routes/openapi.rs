//! OpenAPI document describing the public endpoints.
//!
//! The document is derived from the handler annotations at compile time; the
//! title and description come from the `[service]` configuration section.

use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use crate::config::ServiceConfig;
use crate::error::AppError;
use crate::state::AppState;

use super::{health, ping};

#[derive(OpenApi)]
#[openapi(
    paths(health::health, ping::ping),
    components(schemas(health::HealthResponse, ping::PingResponse)),
    tags((name = "probes", description = "Liveness and connectivity checks"))
)]
pub struct ApiDoc;

/// Build the OpenAPI document with the configured service metadata.
pub fn document(service: &ServiceConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = service.title.clone();
    doc.info.version = service.version.clone();
    doc.info.description = service.description.clone();
    doc
}

/// Serve the OpenAPI document as JSON.
pub async fn openapi_json(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = document(&state.config.service)
        .to_json()
        .map_err(|e| AppError::Internal(format!("Failed to serialize OpenAPI document: {}", e)))?;

    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}
