//! Error types for the IOMS client.
//!
//! Every API call returns `Result<T, ApiError>` so callers can tell an
//! expired session from a missing record from a dropped connection.

use ioms_core::draft::DraftError;
use ioms_core::forms::ValidationErrors;
use reqwest::StatusCode;
use thiserror::Error;

use crate::session::SessionError;

/// Why the client is not (or no longer) authenticated.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No session record exists.
    #[error("no session - sign in required")]
    NoSession,

    /// The session record's expiry has passed.
    #[error("session expired - sign in again")]
    SessionExpired,

    /// The backend rejected the credentials at sign-in.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The refresh endpoint rejected the refresh token, or could not be reached.
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),

    /// The backend still answered 401 after a successful refresh.
    #[error("access token rejected after refresh")]
    Rejected,

    /// The session store could not be read.
    #[error(transparent)]
    Storage(SessionError),
}

/// Errors that can occur when talking to the IOMS backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request needs a session the client does not have.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(#[from] AuthError),

    /// The form did not pass client-side validation.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    /// The order draft does not fit the product catalog.
    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] DraftError),

    /// The backend rejected the request body (HTTP 400).
    #[error("Rejected by server: {0}")]
    Validation(String),

    /// The signed-in user may not access the resource (HTTP 403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other unexpected status.
    #[error("Unexpected HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Session storage failed.
    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("product 7".to_string());
        assert_eq!(err.to_string(), "Not found: product 7");
        assert!(err.is_not_found());

        let err = ApiError::from(AuthError::SessionExpired);
        assert_eq!(err.to_string(), "Unauthenticated: session expired - sign in again");
        assert!(err.is_unauthenticated());
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected HTTP 502 Bad Gateway: upstream down");
    }
}
