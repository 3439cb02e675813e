//! Owned-story (draft) routes, nested under `/api/v1/users/{uid}`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post, routing::put};
use serde::Deserialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use talehub_core::blob::BlobUpload;
use talehub_core::error::DomainError;
use talehub_stories::model::{NewStory, Story, StoryScope};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for PUT `/stories/{id}/chapters/{key}`.
#[derive(Debug, Deserialize)]
pub struct SaveChapterRequest {
    /// Rich-text chapter content.
    pub content: String,
    /// If set, the write is rejected unless the stored revision matches.
    #[serde(default)]
    pub expected_revision: Option<i64>,
}

/// GET /stories
#[instrument(skip(state))]
async fn list_stories(
    State(state): State<AppState>,
    Path(uid): Path<Uuid>,
) -> Result<Json<Vec<Story>>, ApiError> {
    Ok(Json(state.stories.list_owned(uid).await?))
}

/// Pulls the story form out of a multipart body: `title`, `plot`, and the
/// `image` file.
async fn read_story_form(mut multipart: Multipart) -> Result<NewStory, DomainError> {
    let mut title = String::new();
    let mut plot = String::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(ToOwned::to_owned);
        match name.as_deref() {
            Some("title") => {
                title = field
                    .text()
                    .await
                    .map_err(|e| DomainError::Validation(format!("invalid title field: {e}")))?;
            }
            Some("plot") => {
                plot = field
                    .text()
                    .await
                    .map_err(|e| DomainError::Validation(format!("invalid plot field: {e}")))?;
            }
            Some("image") => {
                let file_name = field.file_name().unwrap_or("cover").to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| DomainError::Validation(format!("invalid image field: {e}")))?;
                debug!(bytes = bytes.len(), file_name = %file_name, "cover upload received");
                image = Some(BlobUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(NewStory {
        title,
        plot,
        image: image.ok_or_else(|| DomainError::Validation("cover image is required".into()))?,
    })
}

/// POST /stories (multipart: title, plot, image)
#[instrument(skip(state, multipart))]
async fn create_story(
    State(state): State<AppState>,
    Path(uid): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Story>), ApiError> {
    let new_story = read_story_form(multipart).await?;
    let story = state.stories.create_owned(uid, new_story).await?;
    Ok((StatusCode::CREATED, Json(story)))
}

/// GET /stories/{id}
#[instrument(skip(state))]
async fn get_story(
    State(state): State<AppState>,
    Path((uid, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Story>, ApiError> {
    Ok(Json(
        state.stories.get_story(StoryScope::Owned(uid), id).await?,
    ))
}

/// PUT /stories/{id}/chapters/{key}
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
                StoryScope::Owned(uid),
                id,
                &key,
                request.content,
                request.expected_revision,
            )
            .await?,
    ))
}

/// POST /stories/{id}/publish
#[instrument(skip(state))]
async fn publish_story(
    State(state): State<AppState>,
    Path((uid, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Story>, ApiError> {
    Ok(Json(state.stories.publish(uid, id).await?))
}

/// Returns the owned-story router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stories", get(list_stories).post(create_story))
        .route("/stories/{id}", get(get_story))
        .route("/stories/{id}/chapters/{key}", put(save_chapter))
        .route("/stories/{id}/publish", post(publish_story))
}
