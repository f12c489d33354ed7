//! Authorization error taxonomy and HTTP status mapping.
//!
//! One consistent mapping per error kind, applied by every endpoint:
//! 429 rate limited, 403 origin/authorization, 401 unauthenticated or bad
//! credentials, 500 infrastructure (generic body, detail in server logs).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Outcome of a failed gating check.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Per-IP request cap exceeded for this endpoint window.
    #[error("too many requests, slow down")]
    RateLimited,

    /// Referer absent or not matching the serving host.
    #[error("unauthorized request - invalid origin")]
    InvalidOrigin,

    /// Session cookie missing, malformed, expired, or badly signed.
    #[error("unauthorized request - not logged in")]
    Unauthenticated,

    /// Authenticated, but the session's role does not permit the action.
    #[error("forbidden")]
    Forbidden,

    /// Username/password pair did not check out. The message is identical
    /// for unknown users and wrong passwords to prevent enumeration.
    #[error("Invalid username or password")]
    InvalidCredential,

    /// Store or hashing subsystem unavailable. The only kind logged with
    /// full detail server-side; clients get a generic message.
    #[error("internal server error")]
    Infrastructure(String),
}

impl AuthError {
    /// HTTP status for this error kind.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AuthError::InvalidOrigin => StatusCode::FORBIDDEN,
            AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AuthError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::Infrastructure(ref detail) = self {
            tracing::error!(detail = %detail, "Infrastructure failure");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
