use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised by the bookkeeping library itself.
#[derive(Debug, Error)]
pub enum ReflectionError {
    #[error("invalid calendar date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("subject id must not be empty")]
    InvalidSubject,

    #[error("completion window must be at least one day")]
    InvalidWindow,

    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReflectionError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate { .. } | Self::InvalidSubject | Self::InvalidWindow
        )
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ReflectionError> for AppError {
    fn from(err: ReflectionError) -> Self {
        if err.is_validation() {
            Self::bad_request(err.to_string())
        } else {
            Self::internal(err)
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
