//! REST API handlers

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use fin_health_core::analysis::{run_analysis, AnalysisResult};
use fin_health_core::sanitize::sanitize_payload;
use fin_health_core::EngineConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ServerError;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Successful analysis response
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub data: AnalysisResult,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Analyse a `{periods, assumptions}` payload.
///
/// The body is read raw so that a non-JSON body maps to a 400 with the
/// standard `{error}` shape, and loose numbers still reach the sanitiser.
pub async fn analyze(
    State(engine): State<Arc<EngineConfig>>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ServerError> {
    let raw: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "rejected non-JSON analysis request");
        ServerError::MalformedJson(e.to_string())
    })?;

    let sanitized = sanitize_payload(&raw)?;
    let output = run_analysis(&sanitized.input, &engine)?;

    debug!(
        periods = sanitized.input.periods.len(),
        warnings = sanitized.warnings.len() + output.warnings.len(),
        elapsed_us = output.metadata.computation_time_us,
        "analysis served"
    );

    Ok(Json(AnalyzeResponse {
        data: output.result,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::create_router;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(Arc::new(EngineConfig::default()))
    }

    fn decimal_at(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    async fn post_analyze(body: impl Into<Body>) -> (StatusCode, Value) {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/analyze")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = router()
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_valid_payload_returns_data() {
        let payload = json!({
            "periods": [
                {"label": "FY23", "revenue": 100, "netIncome": 10},
                {"label": "FY24", "revenue": 150, "netIncome": 20}
            ],
            "assumptions": {"revenueGrowth": 0}
        });
        let (status, body) = post_analyze(payload.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["scenario"].as_array().unwrap().len(), 3);
        assert_eq!(data["recommendations"].as_array().unwrap().len(), 3);
        assert_eq!(decimal_at(&data["scenario"][0]["revenue"]), dec!(225));
        assert_eq!(decimal_at(&data["metrics"]["cagr"]), dec!(0.5));
    }

    #[tokio::test]
    async fn test_empty_periods_is_400() {
        let (status, body) = post_analyze(json!({"periods": []}).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("at least one"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_400() {
        let (status, body) = post_analyze("revenue=100").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Request body is not valid JSON"));
    }

    #[tokio::test]
    async fn test_non_object_root_is_400() {
        let (status, _) = post_analyze("[1, 2, 3]").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
