//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input field
    #[error("{0}")]
    InvalidInput(String),

    /// Username or email already registered
    #[error("Username or email already exists")]
    IdentityTaken,

    /// Invalid credentials (unknown email or wrong password)
    ///
    /// `remaining` carries the attempts left before lockout when the
    /// failure was a wrong password against an existing account.
    #[error("{}", invalid_credentials_message(.remaining))]
    InvalidCredentials { remaining: Option<u16> },

    /// Account is locked (too many failed attempts)
    #[error("Account is temporarily locked. Please try again later.")]
    AccountLocked,

    /// Submitted current password does not verify against the stored hash
    #[error("Current password is incorrect")]
    PasswordMismatch,

    /// Too many attempts for this identifier or origin inside the window
    #[error("Too many login attempts. Please try again later.")]
    RateLimited,

    /// Missing or mismatched anti-forgery token
    #[error("Invalid security token")]
    CsrfRejected,

    /// Request requires an authenticated session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Session token missing, malformed, or not backed by a session row
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Entity lookup came up empty
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn invalid_credentials_message(remaining: &Option<u16>) -> String {
    match remaining {
        Some(n) => format!("Invalid email or password. {} attempts remaining.", n),
        None => "Invalid email or password".to_string(),
    }
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthError::IdentityTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials { .. } => StatusCode::UNAUTHORIZED,
            AuthError::AccountLocked => StatusCode::LOCKED,
            AuthError::PasswordMismatch => StatusCode::UNAUTHORIZED,
            AuthError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AuthError::CsrfRejected => StatusCode::FORBIDDEN,
            AuthError::NotAuthenticated | AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::NotFound(_) => StatusCode::NOT_FOUND,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput(_) => ErrorKind::BadRequest,
            AuthError::IdentityTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials { .. }
            | AuthError::PasswordMismatch
            | AuthError::NotAuthenticated
            | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::AccountLocked => ErrorKind::Locked,
            AuthError::RateLimited => ErrorKind::TooManyRequests,
            AuthError::CsrfRejected => ErrorKind::Forbidden,
            AuthError::NotFound(_) => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Store and internal failures surface only a generic message; the
    /// detail stays in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => AppError::new(
                self.kind(),
                "Something went wrong. Please try again later.",
            ),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials { .. } => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountLocked => {
                tracing::warn!("Login attempt on locked account");
            }
            AuthError::RateLimited => {
                tracing::warn!("Login attempt rate limited");
            }
            AuthError::CsrfRejected => {
                tracing::warn!("Request rejected by CSRF guard");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::InvalidInput(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::InvalidInput("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::IdentityTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials { remaining: None }.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::AccountLocked.status_code(), StatusCode::LOCKED);
        assert_eq!(
            AuthError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(AuthError::CsrfRejected.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_invalid_credentials_messages() {
        let without = AuthError::InvalidCredentials { remaining: None };
        assert_eq!(without.to_string(), "Invalid email or password");

        let with = AuthError::InvalidCredentials { remaining: Some(3) };
        assert_eq!(
            with.to_string(),
            "Invalid email or password. 3 attempts remaining."
        );
    }

    #[test]
    fn test_store_failure_is_generic() {
        let err = AuthError::Internal("connection pool exploded".into());
        let app = err.to_app_error();
        assert_eq!(app.status_code(), 500);
        assert!(!app.message().contains("pool"));
    }
}
