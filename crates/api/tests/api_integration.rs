//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use tower::ServiceExt;

const NOT_IMPLEMENTED: &str = "Analysis pipeline not implemented yet.";

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    swing_ai::create_app(get_metrics_handle())
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn post_analysis(body: &Value) -> Request<Body> {
    post_raw("application/json", serde_json::to_string(body).unwrap())
}

fn post_raw(content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/analysis")
        .header("content-type", content_type)
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (status, json) = send(setup(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_health_check_is_idempotent() {
    let app = setup();

    for _ in 0..3 {
        let (status, json) = send(app.clone(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "status": "ok" }));
    }

    // Unrelated traffic in between does not change the answer.
    send(app.clone(), post_analysis(&json!({}))).await;
    let (status, json) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_analysis_with_swing_id_is_not_implemented() {
    let (status, json) = send(setup(), post_analysis(&json!({ "swing_id": "abc123" }))).await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(json, json!({ "detail": NOT_IMPLEMENTED }));
}

#[tokio::test]
async fn test_analysis_with_goal_is_not_implemented() {
    let (status, json) = send(
        setup(),
        post_analysis(&json!({ "swing_id": "abc123", "goal_id": "g1" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(json["detail"], NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_analysis_with_null_goal_is_not_implemented() {
    let (status, json) = send(
        setup(),
        post_analysis(&json!({ "swing_id": "abc123", "goal_id": null })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(json["detail"], NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_analysis_ignores_unknown_fields() {
    let (status, _) = send(
        setup(),
        post_analysis(&json!({ "swing_id": "abc123", "club": "7-iron" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_analysis_missing_swing_id() {
    let (status, json) = send(setup(), post_analysis(&json!({}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = json["detail"].as_array().expect("detail should be a list");
    assert_eq!(detail.len(), 1);
    assert_eq!(detail[0]["type"], "missing");
    assert_eq!(detail[0]["loc"], json!(["body", "swing_id"]));
    assert_eq!(detail[0]["msg"], "Field required");
}

#[tokio::test]
async fn test_analysis_swing_id_wrong_type() {
    let (status, json) = send(setup(), post_analysis(&json!({ "swing_id": 123 }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["detail"][0]["type"], "string_type");
    assert_eq!(json["detail"][0]["loc"], json!(["body", "swing_id"]));
    assert_eq!(json["detail"][0]["input"], 123);
}

#[tokio::test]
async fn test_analysis_null_swing_id() {
    let (status, _) = send(setup(), post_analysis(&json!({ "swing_id": null }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_analysis_goal_id_wrong_type() {
    let (status, json) = send(
        setup(),
        post_analysis(&json!({ "swing_id": "abc123", "goal_id": 5 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["detail"][0]["loc"], json!(["body", "goal_id"]));
}

#[tokio::test]
async fn test_analysis_non_object_body() {
    let (status, json) = send(setup(), post_analysis(&json!(["abc123"]))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["detail"][0]["type"], "model_attributes_type");
}

#[tokio::test]
async fn test_analysis_malformed_json() {
    let (status, json) = send(setup(), post_raw("application/json", "{\"swing_id\":")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["detail"][0]["type"], "json_invalid");
    assert_eq!(json["detail"][0]["loc"][0], "body");
}

#[tokio::test]
async fn test_analysis_without_json_content_type() {
    let (status, json) = send(setup(), post_raw("text/plain", r#"{"swing_id":"abc123"}"#)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["detail"][0]["type"], "model_attributes_type");
}

#[tokio::test]
async fn test_analysis_without_content_type_parses_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/analysis")
        .body(Body::from(r#"{"swing_id":"abc123"}"#))
        .unwrap();

    let (status, json) = send(setup(), request).await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(json["detail"], NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_analysis_without_content_type_still_validates() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/analysis")
        .body(Body::from(r#"{"swing_id":123}"#))
        .unwrap();

    let (status, json) = send(setup(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["detail"][0]["type"], "string_type");
}

#[tokio::test]
async fn test_analysis_empty_body_is_missing() {
    let (status, json) = send(setup(), post_raw("application/json", Body::empty())).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json,
        json!({
            "detail": [{
                "type": "missing",
                "loc": ["body"],
                "msg": "Field required",
                "input": null
            }]
        })
    );
}

#[tokio::test]
async fn test_analysis_wrong_method() {
    let (status, json) = send(setup(), get("/v1/analysis")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["detail"], "Method Not Allowed");
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, json) = send(setup(), get("/v1/swings")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "detail": "Not Found" }));
}

#[tokio::test]
async fn test_metrics_count_analysis_outcomes() {
    let app = setup();

    send(app.clone(), post_analysis(&json!({ "swing_id": "abc123" }))).await;
    send(app.clone(), post_analysis(&json!({ "swing_id": 1 }))).await;

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains(r#"analysis_requests_total{outcome="not_implemented"}"#));
    assert!(text.contains(r#"analysis_requests_total{outcome="rejected"}"#));
}

#[tokio::test]
async fn test_openapi_document() {
    let (status, doc) = send(setup(), get("/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Swing AI Service");
    assert!(doc["paths"]["/health"]["get"].is_object());

    let analysis = &doc["paths"]["/v1/analysis"]["post"];
    assert!(analysis["responses"]["501"].is_object());
    assert!(analysis["responses"]["422"].is_object());

    let schema = &doc["components"]["schemas"]["AnalysisRequest"];
    assert_eq!(schema["properties"]["swing_id"]["type"], "string");
    assert!(schema["properties"]["goal_id"].is_object());
    let required = schema["required"].as_array().expect("required list");
    assert!(required.contains(&json!("swing_id")));
    assert!(!required.contains(&json!("goal_id")));
}
