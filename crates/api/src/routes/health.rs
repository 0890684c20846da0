//! Liveness endpoint.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(value_type = String, example = "ok")]
    pub status: &'static str,
}

/// GET /health: always `{"status":"ok"}` while the process is serving.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
