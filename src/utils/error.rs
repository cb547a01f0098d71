use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Missing or invalid bearer token")]
    Unauthorized,

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Fetched content is not an image (content type: {content_type})")]
    NotAnImage { content_type: String },

    #[error("Image is {size} bytes, limit is {limit} bytes")]
    ImageTooLarge { size: u64, limit: u64 },

    #[error("Image fetch from {url} failed with status {status}")]
    FetchFailed { url: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Document store returned {status}: {message}")]
    DocumentStore { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl HookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HookError::InvalidPayload(_) | HookError::ValidationError { .. } => {
                StatusCode::BAD_REQUEST
            }
            HookError::Unauthorized => StatusCode::UNAUTHORIZED,
            HookError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            HookError::NotAnImage { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            HookError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            HookError::FetchFailed { .. }
            | HookError::HttpError(_)
            | HookError::DocumentStore { .. } => StatusCode::BAD_GATEWAY,
            HookError::IoError(_)
            | HookError::ConfigError { .. }
            | HookError::InvalidConfigValueError { .. }
            | HookError::MissingConfigError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HookError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "❌ {}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "⚠️ {}", self);
        }

        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, HookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_4xx() {
        assert_eq!(
            HookError::InvalidPayload("bad json".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HookError::DocumentNotFound("abc".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HookError::NotAnImage {
                content_type: "text/html".into()
            }
            .status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[test]
    fn test_upstream_errors_map_to_bad_gateway() {
        let err = HookError::FetchFailed {
            url: "https://files.example.com/a.png".into(),
            status: 403,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("403"));
    }
}
