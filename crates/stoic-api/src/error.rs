use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use stoic_types::{ChatFailure, DataUriError};
use thiserror::Error;

/// Everything that can go wrong while serving `/api/chat`.
///
/// All variants map to HTTP 500 with `{ message, details }`; callers treat
/// any non-2xx the same way.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid image: {0}")]
    InvalidImage(#[from] DataUriError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] anyhow::Error),

    #[error("Upstream request timed out after {0}s")]
    Timeout(u64),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Message of the underlying failure, without our own prefix.
    ///
    /// Upstream errors keep their whole cause chain (`outer: inner: ...`).
    pub fn details(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::InvalidImage(e) => e.to_string(),
            ApiError::Upstream(e) => format!("{:#}", e),
            ApiError::Timeout(secs) => format!("Request timed out after {}s", secs),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("API Error: {}", self);

        (self.status(), Json(ChatFailure::new(self.details()))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_strip_prefix() {
        let err = ApiError::Upstream(anyhow::anyhow!("quota exceeded"));
        assert_eq!(err.to_string(), "Upstream error: quota exceeded");
        assert_eq!(err.details(), "quota exceeded");
    }

    #[test]
    fn test_details_keep_cause_chain() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = ApiError::Upstream(anyhow::Error::new(cause).context("Failed to send request"));
        assert_eq!(err.details(), "Failed to send request: connection refused");
    }

    #[test]
    fn test_every_error_is_500() {
        let errors = [
            ApiError::BadRequest("missing body".to_string()),
            ApiError::InvalidImage(DataUriError::MissingScheme),
            ApiError::Upstream(anyhow::anyhow!("network down")),
            ApiError::Timeout(120),
        ];
        for err in errors {
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
