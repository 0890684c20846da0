//! OpenAPI document for the service.

use axum::Json;
use common::AnalysisRequest;
use utoipa::OpenApi;

use crate::routes::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    info(title = "Swing AI Service"),
    paths(crate::routes::health::check, crate::routes::analysis::request),
    components(schemas(AnalysisRequest, HealthResponse)),
    tags(
        (name = "health", description = "Liveness"),
        (name = "analysis", description = "Swing analysis requests"),
    )
)]
pub struct ApiDoc;

/// GET /openapi.json
pub async fn get() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
