//! Cloned-story routes, nested under `/api/v1/users/{uid}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post, routing::put};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use talehub_stories::model::{ClonedStory, ProposalDetails, ProposedChange, Story, StoryScope};

use crate::error::ApiError;
use crate::routes::stories::SaveChapterRequest;
use crate::state::AppState;

/// Request body for POST /cloned.
#[derive(Debug, Deserialize)]
pub struct CloneRequest {
    /// Id of the published story to clone.
    pub story_id: Uuid,
}

/// Request body for POST `/cloned/{id}/submit`.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// Proposal title.
    pub pr_title: String,
    /// Free-form comment for the creator.
    #[serde(default)]
    pub pr_comment: String,
}

/// GET /cloned
#[instrument(skip(state))]
async fn list_cloned(
    State(state): State<AppState>,
    Path(uid): Path<Uuid>,
) -> Result<Json<Vec<ClonedStory>>, ApiError> {
    Ok(Json(state.stories.list_cloned(uid).await?))
}

/// POST /cloned
#[instrument(skip(state, request), fields(story_id = %request.story_id))]
async fn clone_story(
    State(state): State<AppState>,
    Path(uid): Path<Uuid>,
    Json(request): Json<CloneRequest>,
) -> Result<(StatusCode, Json<ClonedStory>), ApiError> {
    let cloned = state.stories.clone_story(uid, request.story_id).await?;
    Ok((StatusCode::CREATED, Json(cloned)))
}

/// GET /cloned/{id}
#[instrument(skip(state))]
async fn get_cloned(
    State(state): State<AppState>,
    Path((uid, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Story>, ApiError> {
    Ok(Json(
        state.stories.get_story(StoryScope::Cloned(uid), id).await?,
    ))
}

/// PUT /cloned/{id}/chapters/{key}
#[instrument(skip(state, request))]
async fn save_chapter(
    State(state): State<AppState>,
    Path((uid, id, key)): Path<(Uuid, Uuid, String)>,
    Json(request): Json<SaveChapterRequest>,
) -> Result<Json<Story>, ApiError> {
    Ok(Json(
        state
            .stories
            .save_chapter(
                StoryScope::Cloned(uid),
                id,
                &key,
                request.content,
                request.expected_revision,
            )
            .await?,
    ))
}

/// POST /cloned/{id}/submit
#[instrument(skip(state, request))]
async fn submit(
    State(state): State<AppState>,
    Path((uid, id)): Path<(Uuid, Uuid)>,
    Json(request): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<ProposedChange>), ApiError> {
    let proposal = state
        .stories
        .submit_proposed_change(
            uid,
            id,
            ProposalDetails {
                pr_title: request.pr_title,
                pr_comment: request.pr_comment,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(proposal)))
}

/// Returns the cloned-story router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cloned", get(list_cloned).post(clone_story))
        .route("/cloned/{id}", get(get_cloned))
        .route("/cloned/{id}/chapters/{key}", put(save_chapter))
        .route("/cloned/{id}/submit", post(submit))
}
