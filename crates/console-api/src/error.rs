//! API client errors

use console_core::DomainError;
use console_security::SessionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend answered code 401 or HTTP 401.
    #[error("Session expired, please sign in again")]
    Unauthorized,

    #[error("Request rejected ({code}): {msg}")]
    Business { code: i64, msg: String },

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("No ids given for {0}")]
    EmptyIds(&'static str),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP transport failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<ApiError> for DomainError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => DomainError::Unauthorized,
            ApiError::Decode(e) => DomainError::MalformedMenuData(e),
            other => DomainError::MenuSourceUnavailable(other.to_string()),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthorized => ApiError::Unauthorized,
            DomainError::MalformedMenuData(e) => ApiError::Decode(e),
            DomainError::MenuSourceUnavailable(msg) => ApiError::Business { code: 500, msg },
        }
    }
}
