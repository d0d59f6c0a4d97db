//! Uniform JSON response envelope
//!
//! Every endpoint answers with `{success: bool, message?: string, ...data}`.
//! Success payloads are flattened into the envelope; failures carry the
//! [`ErrorKind`] code and user-facing message only; internal detail stays
//! in the logs.

use serde::Serialize;

use crate::error::app_error::AppError;
use crate::error::kind::ErrorKind;

/// Response envelope for successful requests
///
/// ## Examples
/// ```rust
/// use kernel::response::ApiResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Payload { user_id: i64 }
///
/// let body = ApiResponse::ok(Payload { user_id: 7 });
/// let json = serde_json::to_value(&body).unwrap();
/// assert_eq!(json["success"], true);
/// assert_eq!(json["user_id"], 7);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success envelope wrapping a payload
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Attach a user-facing message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// Success envelope with no payload
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
        }
    }

    /// Success envelope with only a message
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Error envelope body (the failure half of the uniform envelope)
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            success: false,
            error: err.kind(),
            message: err.message().to_string(),
            action: err.action().map(str::to_string),
        }
    }
}

#[cfg(feature = "axum")]
mod axum_impl {
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};

    use super::{ApiResponse, ErrorBody};
    use crate::error::app_error::AppError;

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ErrorBody::from(&self))).into_response()
        }
    }

    impl<T: serde::Serialize> IntoResponse for ApiResponse<T> {
        fn into_response(self) -> Response {
            Json(self).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Payload {
        user_id: i64,
    }

    #[test]
    fn test_ok_envelope_flattens_payload() {
        let body = ApiResponse::ok(Payload { user_id: 42 });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["user_id"], 42);
        assert!(json.get("message").is_none());
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_ok_message_envelope() {
        let body = ApiResponse::ok_message("Logout successful");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Logout successful");
    }

    #[test]
    fn test_error_body() {
        let err = AppError::forbidden("Invalid security token");
        let body = ErrorBody::from(&err);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "FORBIDDEN");
        assert_eq!(json["message"], "Invalid security token");
    }
}
