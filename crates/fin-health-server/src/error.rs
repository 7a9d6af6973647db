//! Error types for the REST layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fin_health_core::FinHealthError;
use serde::Serialize;

/// Message returned for any failure the client cannot act on.
pub const GENERIC_FAILURE: &str = "Unable to complete the financial analysis";

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Request body is not valid JSON: {0}")]
    MalformedJson(String),

    #[error(transparent)]
    Analysis(#[from] FinHealthError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            ServerError::Analysis(FinHealthError::EmptyInput)
            | ServerError::Analysis(FinHealthError::InvalidInput { .. }) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "financial analysis failed");
            GENERIC_FAILURE.to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::MalformedJson("eof".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::from(FinHealthError::EmptyInput).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::from(FinHealthError::ConfigError("bad".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_errors_keep_message() {
        let response = ServerError::from(FinHealthError::EmptyInput).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
