//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use trivia_core::error::SourceError;
use trivia_core::translation::TranslationError;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The remote question source could not be set up.
    #[error("question source error: {0}")]
    Source(#[from] SourceError),

    /// The translation provider could not be set up.
    #[error("translation provider error: {0}")]
    Translation(#[from] TranslationError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `SourceError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub SourceError);

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            SourceError::InvalidCategory(_) => (StatusCode::BAD_REQUEST, "invalid_category"),
            SourceError::NoFallbackAvailable(_) => (StatusCode::NOT_FOUND, "no_questions_available"),
            SourceError::SourceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "source_unavailable")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use trivia_core::category::Category;

    fn status_of(err: SourceError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_invalid_category_maps_to_400() {
        assert_eq!(
            status_of(SourceError::InvalidCategory("astrologia".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_no_fallback_available_maps_to_404() {
        assert_eq!(
            status_of(SourceError::NoFallbackAvailable(Category::Arte)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_source_unavailable_maps_to_503() {
        assert_eq!(
            status_of(SourceError::SourceUnavailable("timeout".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
