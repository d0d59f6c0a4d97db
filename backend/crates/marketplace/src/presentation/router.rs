//! Marketplace Router
//!
//! Nests `/products`, `/cart` and `/messages`. Personal routes sit
//! behind the auth crate's `require_auth`; every POST additionally
//! passes its CSRF guard. Session verification runs against the same
//! session store the auth router writes.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use auth::application::config::AuthConfig;
use auth::domain::repository::SessionRepository;
use auth::infra::postgres::PgAuthRepository;
use auth::presentation::middleware::{AuthMiddlewareState, csrf_guard, require_auth};

use crate::application::config::MarketConfig;
use crate::domain::repository::{CartRepository, CatalogRepository, MessageRepository};
use crate::infra::postgres::PgMarketRepository;
use crate::presentation::handlers::{self, MarketAppState};

/// Create the marketplace router with PostgreSQL repositories
pub fn market_router(
    repo: PgMarketRepository,
    session_repo: PgAuthRepository,
    config: MarketConfig,
    auth_config: AuthConfig,
) -> Router {
    market_router_generic(repo, session_repo, config, auth_config)
}

/// Create a generic marketplace router for any repository implementations
pub fn market_router_generic<M, S>(
    repo: M,
    session_repo: S,
    config: MarketConfig,
    auth_config: AuthConfig,
) -> Router
where
    M: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let state = MarketAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };
    let mw_state = AuthMiddlewareState {
        repo: Arc::new(session_repo),
        config: Arc::new(auth_config),
    };

    Router::new()
        .nest("/products", products_router(&state, &mw_state))
        .nest("/cart", cart_router(&state, &mw_state))
        .nest("/messages", messages_router(&state, &mw_state))
}

fn products_router<M, S>(
    state: &MarketAppState<M>,
    mw_state: &AuthMiddlewareState<S>,
) -> Router
where
    M: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let public = Router::new()
        .route("/", get(handlers::list_products::<M>))
        .route("/featured", get(handlers::featured_products::<M>))
        .route("/categories", get(handlers::categories::<M>))
        .route("/{id}", get(handlers::product_detail::<M>));

    let personal = Router::new()
        .route("/mine", get(handlers::my_products::<M>))
        .layer(middleware::from_fn_with_state(
            mw_state.clone(),
            require_auth::<S>,
        ));

    let mutating = Router::new()
        .route("/add", post(handlers::add_product::<M>))
        .route("/{id}/update", post(handlers::update_product::<M>))
        .route("/{id}/delete", post(handlers::delete_product::<M>))
        .layer(middleware::from_fn_with_state(
            mw_state.clone(),
            csrf_guard::<S>,
        ))
        .layer(middleware::from_fn_with_state(
            mw_state.clone(),
            require_auth::<S>,
        ));

    public.merge(personal).merge(mutating).with_state(state.clone())
}

fn cart_router<M, S>(state: &MarketAppState<M>, mw_state: &AuthMiddlewareState<S>) -> Router
where
    M: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let reads = Router::new()
        .route("/", get(handlers::cart_contents::<M>))
        .route("/orders", get(handlers::orders::<M>));

    let writes = Router::new()
        .route("/add", post(handlers::add_to_cart::<M>))
        .route("/update", post(handlers::update_cart::<M>))
        .route("/remove", post(handlers::remove_from_cart::<M>))
        .route("/clear", post(handlers::clear_cart::<M>))
        .route("/checkout", post(handlers::checkout::<M>))
        .layer(middleware::from_fn_with_state(
            mw_state.clone(),
            csrf_guard::<S>,
        ));

    reads
        .merge(writes)
        .layer(middleware::from_fn_with_state(
            mw_state.clone(),
            require_auth::<S>,
        ))
        .with_state(state.clone())
}

fn messages_router<M, S>(state: &MarketAppState<M>, mw_state: &AuthMiddlewareState<S>) -> Router
where
    M: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let reads = Router::new()
        .route("/conversations", get(handlers::conversations::<M>))
        .route("/conversation", get(handlers::conversation::<M>))
        .route("/unread_count", get(handlers::unread_count::<M>));

    let writes = Router::new()
        .route("/send", post(handlers::send_message::<M>))
        .route("/mark_read", post(handlers::mark_read::<M>))
        .route("/delete", post(handlers::delete_message::<M>))
        .layer(middleware::from_fn_with_state(
            mw_state.clone(),
            csrf_guard::<S>,
        ));

    reads
        .merge(writes)
        .layer(middleware::from_fn_with_state(
            mw_state.clone(),
            require_auth::<S>,
        ))
        .with_state(state.clone())
}
