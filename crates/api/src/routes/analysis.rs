//! Swing analysis endpoint.
//!
//! The analysis pipeline does not exist yet. Requests are validated so
//! clients can integrate against the payload shape published in
//! `/openapi.json`, then refused with 501.

use common::AnalysisRequest;

use crate::error::ApiError;
use crate::extract::ValidatedJson;

pub const NOT_IMPLEMENTED_DETAIL: &str = "Analysis pipeline not implemented yet.";

/// Counter name, labelled by `outcome` (`rejected` or `not_implemented`).
pub const REQUESTS_METRIC: &str = "analysis_requests_total";

/// POST /v1/analysis: 422 on a malformed body, otherwise 501.
#[utoipa::path(
    post,
    path = "/v1/analysis",
    request_body = AnalysisRequest,
    responses(
        (status = 422, description = "Body is missing, not JSON, or fails field validation"),
        (status = 501, description = "Analysis pipeline not implemented yet"),
    ),
    tag = "analysis"
)]
#[tracing::instrument(skip_all)]
pub async fn request(payload: Result<ValidatedJson<AnalysisRequest>, ApiError>) -> ApiError {
    let ValidatedJson(req) = match payload {
        Ok(payload) => payload,
        Err(err) => {
            tracing::debug!(error = %err, "rejected analysis request");
            metrics::counter!(REQUESTS_METRIC, "outcome" => "rejected").increment(1);
            return err;
        }
    };

    tracing::info!(
        swing_id = %req.swing_id,
        goal_id = ?req.goal_id.as_ref().map(|g| g.as_str()),
        "analysis requested but pipeline is not available"
    );
    metrics::counter!(REQUESTS_METRIC, "outcome" => "not_implemented").increment(1);

    ApiError::NotImplemented(NOT_IMPLEMENTED_DETAIL.to_string())
}
