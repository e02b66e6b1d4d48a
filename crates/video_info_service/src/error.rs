use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use youtube_client::LookupError;

/// Every way a request can fail. The display text is what the client sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    #[error("Video ID is required")]
    MissingVideoId,

    #[error("Invalid YouTube video ID format")]
    InvalidVideoId,

    #[error("Method not allowed. Use POST.")]
    MethodNotAllowed,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Server configuration error")]
    Configuration,

    #[error("YouTube API quota exceeded or invalid API key")]
    QuotaOrAuth,

    #[error("Video not found or is private/unavailable")]
    NotFound,

    #[error("Unable to connect to YouTube API. Please try again later.")]
    Unreachable,

    #[error("Request timeout. Please try again.")]
    Timeout,

    #[error("Internal server error. Please try again later.")]
    Internal,
}

impl HandlerError {
    pub fn status(self) -> StatusCode {
        match self {
            Self::MissingVideoId | Self::InvalidVideoId => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::QuotaOrAuth => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Unreachable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Configuration | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LookupError> for HandlerError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::QuotaOrAuth => Self::QuotaOrAuth,
            LookupError::Timeout => Self::Timeout,
            LookupError::Unreachable(_) => Self::Unreachable,
            LookupError::Status(_) | LookupError::Decode(_) => Self::Internal,
        }
    }
}

/// Error body sent to the client
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
