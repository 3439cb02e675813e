//! TaleHub API — axum HTTP surface over the story repository and identity
//! service.
//!
//! The router is built by [`app`] so the binary and the tests serve the
//! exact same routes.

use axum::Router;
use axum::middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod guard;
pub mod routes;
pub mod state;

use state::AppState;

/// Builds the full application router.
///
/// Everything under `/api/v1/users/{uid}` sits behind the cookie presence
/// guard; health, auth, the public catalog, and media are open.
pub fn app(state: AppState) -> Router {
    let users = Router::new()
        .merge(routes::stories::router())
        .merge(routes::cloned::router())
        .merge(routes::proposals::router())
        .merge(routes::auth::profile_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_access_token,
        ));

    Router::new()
        .merge(routes::health::router())
        .merge(routes::media::router())
        .nest("/api/v1/auth", routes::auth::router())
        .nest("/api/v1/catalog", routes::catalog::router())
        .nest("/api/v1/users/{uid}", users)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
