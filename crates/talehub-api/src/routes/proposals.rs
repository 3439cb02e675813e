//! Proposed-change (PR inbox) routes, nested under `/api/v1/users/{uid}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use talehub_stories::model::{Disposition, ProposedChange};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST `/proposals/{id}/resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// `accepted` or `rejected`.
    pub disposition: Disposition,
}

/// GET /proposals
#[instrument(skip(state))]
async fn list_proposals(
    State(state): State<AppState>,
    Path(uid): Path<Uuid>,
) -> Result<Json<Vec<ProposedChange>>, ApiError> {
    Ok(Json(state.stories.list_proposed(uid).await?))
}

/// GET /proposals/{id}
#[instrument(skip(state))]
async fn get_proposal(
    State(state): State<AppState>,
    Path((uid, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ProposedChange>, ApiError> {
    Ok(Json(state.stories.get_proposed(uid, id).await?))
}

/// POST /proposals/{id}/resolve
#[instrument(skip(state, request))]
async fn resolve(
    State(state): State<AppState>,
    Path((uid, id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ResolveRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .stories
        .resolve_proposed_change(uid, id, request.disposition)
        .await?;

    info!(story_id = %id, disposition = ?request.disposition, "proposal resolved");
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the proposals router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/proposals", get(list_proposals))
        .route("/proposals/{id}", get(get_proposal))
        .route("/proposals/{id}/resolve", post(resolve))
}
