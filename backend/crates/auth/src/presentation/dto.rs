//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::account::Account;

// ============================================================================
// CSRF
// ============================================================================

/// CSRF token response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    /// buyer | seller | both (anything else falls back to both)
    pub user_type: Option<String>,
}

/// Register response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserInfo,
}

// ============================================================================
// Profile
// ============================================================================

/// Partial profile update request; omitted fields are left untouched
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// Change password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ============================================================================
// User info
// ============================================================================

/// Current user info (never carries secret material)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub phone: String,
    pub location: String,
    pub user_type: String,
    pub rating: f64,
    pub total_reviews: i32,
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<&Account> for UserInfo {
    fn from(account: &Account) -> Self {
        Self {
            user_id: account.account_id.as_i64(),
            username: account.username.original().to_string(),
            email: account.email.as_str().to_string(),
            display_name: account.display_name.clone(),
            phone: account.phone.clone(),
            location: account.location.clone(),
            user_type: account.role.code().to_string(),
            rating: account.rating,
            total_reviews: account.total_reviews,
            last_login_at: account.last_login_at,
        }
    }
}

/// Current user envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: UserInfo,
}
