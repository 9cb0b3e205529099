use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use thiserror::Error;

use crate::routes::Envelope;

/// Error taxonomy shared by the auth and post services.
///
/// Every kind maps to one fixed status code so clients can dispatch on
/// status instead of parsing message text:
///
/// | kind       | status |
/// |------------|--------|
/// | Validation | 400    |
/// | Auth       | 401    |
/// | NotFound   | 404    |
/// | Conflict   | 409    |
/// | Upstream   | 500    |
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        // The only UNIQUE column is the user email, so a constraint hit is a
        // duplicate registration that raced past the pre-insert check.
        if let rusqlite::Error::SqliteFailure(e, _) = &err {
            if e.code == rusqlite::ErrorCode::ConstraintViolation {
                return ApiError::Conflict("User already exists".to_owned());
            }
        }
        ApiError::Upstream(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ApiError::Upstream(format!("token signing failed: {err}"))
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(err: argon2::password_hash::Error) -> Self {
        ApiError::Upstream(format!("password hashing failed: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            // Upstream details stay in the logs, not in the response body.
            ApiError::Upstream(detail) => {
                error!("Internal error: {detail}");
                "Something went wrong".to_owned()
            }
            other => other.to_string(),
        };

        (status, Json(Envelope::failure(message))).into_response()
    }
}
