//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{
    AccountRepository, CredentialRepository, LoginAttemptRepository, SessionRepository,
};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, csrf_guard, require_auth};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
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
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };
    let mw_state = AuthMiddlewareState {
        repo: state.repo.clone(),
        config: state.config.clone(),
    };

    // Token issuance is the only route with no guard at all
    let open = Router::new().route("/csrf", get(handlers::csrf_token::<R>));

    // Mutating, pre-auth: the CSRF guard loads the (guest) session itself
    let guarded = Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .layer(middleware::from_fn_with_state(
            mw_state.clone(),
            csrf_guard::<R>,
        ));

    // Authenticated routes; mutating ones also pass the CSRF guard.
    // require_auth is the outer layer, so it loads the session once.
    let account = Router::new()
        .route("/me", get(handlers::me::<R>))
        .merge(
            Router::new()
                .route("/profile", post(handlers::update_profile::<R>))
                .route("/change_password", post(handlers::change_password::<R>))
                .layer(middleware::from_fn_with_state(
                    mw_state.clone(),
                    csrf_guard::<R>,
                )),
        )
        .layer(middleware::from_fn_with_state(mw_state, require_auth::<R>));

    open.merge(guarded).merge(account).with_state(state)
}
