//! Published-story catalog routes.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use tracing::instrument;
use uuid::Uuid;

use talehub_stories::model::{Story, StoryScope};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
#[instrument(skip(state))]
async fn list_catalog(State(state): State<AppState>) -> Result<Json<Vec<Story>>, ApiError> {
    Ok(Json(state.stories.list_catalog().await?))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_catalog_story(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Story>, ApiError> {
    Ok(Json(state.stories.get_story(StoryScope::Catalog, id).await?))
}

/// Returns the router for the public catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_catalog))
        .route("/{id}", get(get_catalog_story))
}
