//! Sign-up, login, and profile routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header;
use axum::response::{AppendHeaders, IntoResponse};
use axum::{Json, Router, routing::get, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use talehub_identity::profile::{NewUser, UserProfile};
use talehub_identity::token::ACCESS_TOKEN_TTL_DAYS;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /sign-up.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    /// Display name.
    pub name: String,
    /// Handle.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Response body for POST /sign-up.
#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    /// The new account's uid.
    pub uid: Uuid,
}

/// Request body for POST /login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// POST /sign-up
#[instrument(skip(state, request))]
async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), ApiError> {
    let uid = state
        .identity
        .sign_up(NewUser {
            name: request.name,
            username: request.username,
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(SignUpResponse { uid })))
}

/// POST /login
///
/// On success sets the access-token cookie for seven days. The cookie is a
/// presence marker for the route guard, nothing more.
#[instrument(skip(state, request))]
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .identity
        .sign_in(&request.email, &request.password)
        .await?;
    let token = state.identity.mint_access_token()?;

    info!(uid = %user.uid, "login succeeded");

    let max_age = u64::from(ACCESS_TOKEN_TTL_DAYS) * 24 * 60 * 60;
    let cookie = format!(
        "{}={token}; Max-Age={max_age}; Path=/; SameSite=Lax",
        state.config.access_token_cookie
    );

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(user),
    ))
}

/// GET /profile (nested under /api/v1/users/{uid})
#[instrument(skip(state))]
async fn profile(
    State(state): State<AppState>,
    Path(uid): Path<Uuid>,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(state.identity.profile(uid).await?))
}

/// Returns the router for sign-up and login.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/login", post(login))
}

/// Returns the profile router, nested under the per-user tree.
pub fn profile_router() -> Router<AppState> {
    Router::new().route("/profile", get(profile))
}
