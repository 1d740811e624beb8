use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Every failure a handler can surface. The HTTP mapping deliberately
/// collapses some internally-distinct cases: login failures are one
/// generic 401, and a project that is missing or owned by someone else
/// is one generic 404 so callers cannot probe which ids exist.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Could not validate credentials")]
    InvalidToken,
    #[error("Invalid ID format")]
    MalformedId,
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("Project not found")]
    AccessDenied,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("User with this email already exists")]
    DuplicateEmail,
    #[error("store error: {0}")]
    Store(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Wrap a repo failure. Store errors are never retried here; the
    /// request fails and the detail stays in the logs.
    pub fn store(e: anyhow::Error) -> Self {
        ApiError::Store(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::InvalidCredentials | ApiError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            ApiError::MalformedId | ApiError::BadRequest(_) | ApiError::DuplicateEmail => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::AccessDenied | ApiError::NotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ApiError::Store(e) => {
                error!(error = %e, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denied_and_missing_share_one_body() {
        // AccessDenied covers both "no such project" and "not yours";
        // the message must not hint at which.
        assert_eq!(ApiError::AccessDenied.to_string(), "Project not found");
    }

    #[test]
    fn internal_detail_is_not_surfaced() {
        let resp = ApiError::Store("connection reset".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
