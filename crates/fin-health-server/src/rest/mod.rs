//! REST API: router and middleware.

pub mod handlers;

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use fin_health_core::EngineConfig;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::ServerError;

/// Build the API router. The engine configuration is shared read-only
/// across requests.
pub fn create_router(engine: Arc<EngineConfig>) -> Router {
    Router::new()
        .route("/api/v1/analyze", post(handlers::analyze))
        .route("/api/v1/health", get(handlers::health))
        .with_state(engine)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ServerError::Internal(detail).into_response()
}
