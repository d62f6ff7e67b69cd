//! Route definitions for the SessionGate HTTP API.
//!
//! All routes are mounted under `/api`. Routes nested under `/protected`
//! run behind the identity gate via `route_layer`, so an unmatched path
//! still answers 404 rather than 401.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(public_routes())
        .nest("/protected", protected_routes(state.clone()));

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Liveness, static info and diagnostic token check
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::public::health))
        .route("/public/info", get(handlers::public::public_info))
        .route("/public/verify-token", post(handlers::public::verify_token))
}

/// Identity-gated endpoints
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user", get(handlers::protected::user_info))
        .route("/data", get(handlers::protected::protected_data))
        .route(
            "/generate-long-lived-token",
            post(handlers::protected::generate_long_lived_token),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_identity,
        ))
}
