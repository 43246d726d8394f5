//! Connectivity check endpoint.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Ping response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PingResponse {
    /// Always "pong".
    #[schema(example = "pong")]
    pub message: String,
}

/// Answers "pong" without touching any other part of the service.
#[utoipa::path(
    get,
    path = "/api/ping",
    tag = "probes",
    responses((status = 200, description = "Connectivity confirmed", body = PingResponse))
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
    })
}
