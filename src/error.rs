//! Error types for snowline

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::models::ErrorResponse;

/// Result type for snowline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while serving a snow-data request
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request body is missing a required parameter
    #[error("Missing {0} parameter")]
    MissingParameter(&'static str),

    /// Scene search matched nothing
    #[error("No images found for the given region and date range")]
    NoImagery,

    /// Imagery query service answered with a failure status
    #[error("imagery service error: {0}")]
    Imagery(String),

    /// Outbound HTTP call failed (transport, status, or body decoding)
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Reverse geocoder answered without a usable name
    #[error("geocoding failed: {0}")]
    Geocode(String),

    /// Invalid service configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns the HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Error::NoImagery => StatusCode::NOT_FOUND,
            Error::Imagery(_) | Error::Http(_) | Error::Geocode(_) | Error::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Client errors carry their own message; anything else is logged
        // server-side and answered with an opaque body.
        let error = if status.is_server_error() {
            tracing::error!(cause = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
