//! Auth Middleware
//!
//! Two guards stack in front of protected routes:
//! - [`require_auth`]: the session must carry an account id; applies
//!   sliding identity renewal and re-issues the cookie when it rotates.
//! - [`csrf_guard`]: every mutating request must present the session's
//!   active anti-forgery token in `X-CSRF-Token` before any business
//!   logic runs.
//!
//! `require_auth` is the outer layer; when both run, only it loads the
//! session row and `csrf_guard` reuses it from the request extensions.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::AuthError;

/// Request header carrying the anti-forgery token
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// The caller's session, loaded by whichever guard ran first
#[derive(Clone)]
pub struct RequestSession(pub Session);

/// Marker extension proving `require_auth` admitted the request
#[derive(Clone)]
pub struct AuthenticatedSession(pub Session);

/// Middleware that requires an authenticated session
pub async fn require_auth<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name)
        .ok_or_else(|| AuthError::NotAuthenticated.into_response())?;

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let renewed = use_case
        .get_authenticated(&token)
        .await
        .map_err(|e| e.into_response())?;

    req.extensions_mut()
        .insert(RequestSession(renewed.session.clone()));
    req.extensions_mut()
        .insert(AuthenticatedSession(renewed.session));

    let mut response = next.run(req).await;

    if let Some(token) = renewed.reissued_token {
        append_session_cookie(&mut response, &state.config, &token);
    }

    Ok(response)
}

/// Middleware that verifies the anti-forgery token on mutating requests
pub async fn csrf_guard<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    // Reuse the session when require_auth already loaded it
    let (session, reissued_token) = match req.extensions().get::<RequestSession>() {
        Some(RequestSession(session)) => (session.clone(), None),
        None => {
            let token =
                platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name)
                    .ok_or_else(|| AuthError::CsrfRejected.into_response())?;

            let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
            let renewed = use_case
                .get_session(&token)
                .await
                .map_err(|_| AuthError::CsrfRejected.into_response())?;

            (renewed.session, renewed.reissued_token)
        }
    };

    let supplied = req
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !session.verify_csrf(supplied, state.config.csrf_ttl()) {
        return Err(AuthError::CsrfRejected.into_response());
    }

    req.extensions_mut().insert(RequestSession(session));

    let mut response = next.run(req).await;

    if let Some(token) = reissued_token {
        append_session_cookie(&mut response, &state.config, &token);
    }

    Ok(response)
}

/// Attach a renewed session cookie unless the handler already set one
fn append_session_cookie(response: &mut Response, config: &AuthConfig, token: &str) {
    if response.headers().contains_key(header::SET_COOKIE) {
        return;
    }
    let cookie = super::handlers::build_session_cookie(config, token);
    if let Ok(value) = axum::http::HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}
