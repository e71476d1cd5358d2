//! podlog-server library
//!
//! REST backend for podcast guests, episodes and rated appearances.
//! Reads are public; every mutating route requires a bearer token.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use podlog_common::api::TokenSigner;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod validation;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Bearer token signer/verifier
    pub tokens: Arc<TokenSigner>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, tokens: TokenSigner) -> Self {
        Self {
            db,
            tokens: Arc::new(tokens),
        }
    }
}

/// Build application router
///
/// Protected method routes get the bearer middleware via `route_layer`, so
/// public GETs on the same path stay open.
pub fn build_router(state: AppState) -> Router {
    let auth = middleware::from_fn_with_state(state.clone(), api::require_bearer);

    Router::new()
        .route("/auth/register", post(api::register))
        .route("/auth/login", post(api::login))
        .route(
            "/guests",
            get(api::list_guests).merge(post(api::create_guest).route_layer(auth.clone())),
        )
        .route(
            "/guests/:id",
            get(api::get_guest).merge(delete(api::delete_guest).route_layer(auth.clone())),
        )
        .route(
            "/episodes",
            get(api::list_episodes).merge(post(api::create_episode).route_layer(auth.clone())),
        )
        .route(
            "/episodes/:id",
            get(api::get_episode).merge(delete(api::delete_episode).route_layer(auth.clone())),
        )
        .route(
            "/appearances",
            get(api::list_appearances)
                .merge(post(api::create_appearance).route_layer(auth)),
        )
        .route("/appearances/:id", get(api::get_appearance))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
