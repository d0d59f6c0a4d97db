//! Marketplace Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Marketplace result type alias
pub type MarketResult<T> = Result<T, MarketError>;

/// Marketplace error variants
#[derive(Debug, Error)]
pub enum MarketError {
    /// Malformed or missing input field
    #[error("{0}")]
    InvalidInput(String),

    /// Caller's role or ownership does not allow the operation
    #[error("{0}")]
    Forbidden(&'static str),

    /// Entity lookup came up empty (or is not visible to the caller)
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MarketError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MarketError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            MarketError::Forbidden(_) => StatusCode::FORBIDDEN,
            MarketError::NotFound(_) => StatusCode::NOT_FOUND,
            MarketError::Database(_) | MarketError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketError::InvalidInput(_) => ErrorKind::BadRequest,
            MarketError::Forbidden(_) => ErrorKind::Forbidden,
            MarketError::NotFound(_) => ErrorKind::NotFound,
            MarketError::Database(_) | MarketError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError; store failures stay generic toward clients
    pub fn to_app_error(&self) -> AppError {
        match self {
            MarketError::Database(_) | MarketError::Internal(_) => AppError::new(
                self.kind(),
                "Something went wrong. Please try again later.",
            ),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            MarketError::Database(e) => {
                tracing::error!(error = %e, "Marketplace database error");
            }
            MarketError::Internal(msg) => {
                tracing::error!(message = %msg, "Marketplace internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Marketplace error");
            }
        }
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            MarketError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            MarketError::Forbidden("no").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            MarketError::NotFound("Product").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            MarketError::NotFound("Product").to_string(),
            "Product not found"
        );
    }

    #[test]
    fn test_internal_stays_generic() {
        let err = MarketError::Internal("join blew up on products.seller_id".into());
        assert!(!err.to_app_error().message().contains("seller_id"));
    }
}
