//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use v2m_auth::AuthError;
use v2m_models::ObjectKey;
use v2m_queue::QueueError;
use v2m_storage::StorageError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// Partial failure: the blob is durably stored but no transcode job was
    /// queued. Kept separate from plain queue errors so logs and metrics can
    /// find the orphaned objects that need out-of-band reconciliation.
    #[error("object {key} was stored but no transcode job was queued: {source}")]
    StoredNotQueued { key: ObjectKey, source: QueueError },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The single translation table from error kind to status code.
    ///
    /// `Forbidden` folds into 401 "not authorized"; the variants stay
    /// distinct internally for logs and metrics, and refining the mapping
    /// later touches only this table.
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) | ApiError::Forbidden(_) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(e) if e.is_client_fault() => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_)
            | ApiError::Storage(_)
            | ApiError::Queue(_)
            | ApiError::StoredNotQueued { .. }
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose dependency error details in production
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR
            && std::env::var("ENVIRONMENT").unwrap_or_default() == "production"
        {
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn client_input_errors_map_to_400() {
        assert_eq!(
            status_of(ApiError::bad_request("exactly 1 file required")),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn auth_failures_fold_into_401() {
        assert_eq!(
            status_of(ApiError::unauthorized("missing token")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ApiError::forbidden("not authorized")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ApiError::Auth(AuthError::InvalidToken("expired".into()))),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ApiError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn dependency_failures_map_to_500() {
        assert_eq!(
            status_of(ApiError::Auth(AuthError::Unavailable("down".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ApiError::Auth(AuthError::MalformedClaim("bad json".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ApiError::Storage(StorageError::not_found("abc"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ApiError::Queue(QueueError::publish_failed("down"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn partial_failure_is_a_500_naming_the_stored_object() {
        let key = ObjectKey::generate();
        let err = ApiError::StoredNotQueued {
            key,
            source: QueueError::publish_failed("broker down"),
        };
        assert!(err.to_string().contains(&key.to_string()));
        assert!(err.to_string().contains("stored but no transcode job"));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
