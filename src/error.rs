use crate::services::validation::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM API error: {0}")]
    LlmApi(String),

    #[error("Malformed itinerary response: {0}")]
    MalformedResponse(#[from] ValidationError),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal database error")
            }
            AppError::LlmApi(ref e) => {
                tracing::error!("LLM API error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to generate tour itinerary. Please try again.",
                )
            }
            AppError::MalformedResponse(ref e) => {
                tracing::warn!("Rejected malformed itinerary response: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "The itinerary service returned an invalid response. Please try again.",
                )
            }
            AppError::Geocoding(ref e) => {
                tracing::warn!("Geocoding error: {}", e);
                (StatusCode::BAD_GATEWAY, "Could not resolve your location")
            }
            AppError::Cache(ref e) => {
                tracing::warn!("Cache error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Cache error")
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::Unauthorized(ref e) => {
                tracing::debug!("Unauthorized request: {}", e);
                (StatusCode::UNAUTHORIZED, e.as_str())
            }
            AppError::NotFound(ref e) => (StatusCode::NOT_FOUND, e.as_str()),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (AppError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::Unauthorized("no token".into()), StatusCode::UNAUTHORIZED),
            (AppError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (AppError::LlmApi("timeout".into()), StatusCode::BAD_GATEWAY),
            (
                AppError::MalformedResponse(ValidationError::NotJson("eof".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
