//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use kernel::response::ApiResponse;
use platform::client::extract_client_ip;
use platform::cookie::CookieConfig;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, CsrfTokenUseCase, LoginInput, LoginUseCase,
    LogoutUseCase, RegisterInput, RegisterUseCase, UpdateProfileUseCase, session_token,
};
use crate::domain::entity::account::ProfileUpdate;
use crate::domain::repository::{
    AccountRepository, CredentialRepository, LoginAttemptRepository, SessionRepository,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangePasswordRequest, CsrfTokenResponse, LoginRequest, LoginResponse, MeResponse,
    RegisterRequest, RegisterResponse, UpdateProfileRequest, UserInfo,
};
use crate::presentation::middleware::{AuthenticatedSession, RequestSession};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AccountRepository
        + CredentialRepository
        + LoginAttemptRepository
        + SessionRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// CSRF token
// ============================================================================

/// GET /api/auth/csrf
///
/// Mints a guest session when the caller has none, so the token can be
/// presented on register/login, which are themselves mutating requests.
pub async fn csrf_token<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository
        + CredentialRepository
        + LoginAttemptRepository
        + SessionRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let cookie_token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = CsrfTokenUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(cookie_token, client_ip).await?;

    let body = ApiResponse::ok(CsrfTokenResponse {
        csrf_token: output.csrf_token,
    });

    match output.new_session_token {
        Some(token) => {
            let cookie = build_session_cookie(&state.config, &token);
            Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], body).into_response())
        }
        None => Ok((StatusCode::OK, body).into_response()),
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Extension(RequestSession(session)): Extension<RequestSession>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository
        + CredentialRepository
        + LoginAttemptRepository
        + SessionRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = RegisterInput {
        username: req.username,
        email: req.email,
        password: req.password,
        display_name: req.display_name,
        phone: req.phone,
        location: req.location,
        role: req.user_type,
    };

    let output = use_case.execute(input, session).await?;

    let token = session_token::sign(output.session.session_id, &state.config.session_secret);
    let cookie = build_session_cookie(&state.config, &token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        ApiResponse::ok(RegisterResponse {
            user_id: output.account_id.as_i64(),
        })
        .with_message("Registration successful"),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Extension(RequestSession(session)): Extension<RequestSession>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository
        + CredentialRepository
        + LoginAttemptRepository
        + SessionRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input, client_ip, session).await?;

    let token = session_token::sign(output.session.session_id, &state.config.session_secret);
    let cookie = build_session_cookie(&state.config, &token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        ApiResponse::ok(LoginResponse {
            user: UserInfo::from(&output.account),
        })
        .with_message("Login successful"),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository
        + CredentialRepository
        + LoginAttemptRepository
        + SessionRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = LogoutUseCase::new(state.repo.clone(), state.config.clone());
        // Destroy best-effort; the cookie is cleared regardless
        let _ = use_case.execute(&token).await;
    }

    let cookie = build_clear_cookie(&state.config);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        ApiResponse::ok_message("Logout successful"),
    ))
}

// ============================================================================
// Current user
// ============================================================================

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
) -> AuthResult<Json<ApiResponse<MeResponse>>>
where
    R: AccountRepository
        + CredentialRepository
        + LoginAttemptRepository
        + SessionRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let account_id = session.account_id.ok_or(AuthError::NotAuthenticated)?;

    // Two repository traits expose find_by_id; name the account one
    let account = AccountRepository::find_by_id(state.repo.as_ref(), &account_id)
        .await?
        .ok_or(AuthError::NotFound("Account"))?;

    Ok(Json(ApiResponse::ok(MeResponse {
        user: UserInfo::from(&account),
    })))
}

// ============================================================================
// Profile update
// ============================================================================

/// POST /api/auth/profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<ApiResponse<()>>>
where
    R: AccountRepository
        + CredentialRepository
        + LoginAttemptRepository
        + SessionRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let account_id = session.account_id.ok_or(AuthError::NotAuthenticated)?;

    let use_case = UpdateProfileUseCase::new(state.repo.clone());
    let update = ProfileUpdate {
        display_name: req.display_name,
        phone: req.phone,
        location: req.location,
    };

    use_case.execute(account_id, update).await?;

    Ok(Json(ApiResponse::ok_message("Profile updated successfully")))
}

// ============================================================================
// Change password
// ============================================================================

/// POST /api/auth/change_password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<Json<ApiResponse<()>>>
where
    R: AccountRepository
        + CredentialRepository
        + LoginAttemptRepository
        + SessionRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let account_id = session.account_id.ok_or(AuthError::NotAuthenticated)?;

    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());
    let input = ChangePasswordInput {
        current_password: req.current_password,
        new_password: req.new_password,
    };

    use_case.execute(account_id, input).await?;

    Ok(Json(ApiResponse::ok_message("Password changed successfully")))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn cookie_config(config: &AuthConfig) -> CookieConfig {
    CookieConfig {
        name: config.session_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: None,
    }
}

pub(crate) fn build_session_cookie(config: &AuthConfig, token: &str) -> String {
    cookie_config(config).build_set_cookie(token)
}

fn build_clear_cookie(config: &AuthConfig) -> String {
    cookie_config(config).build_delete_cookie()
}
