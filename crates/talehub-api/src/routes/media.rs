//! Blob retrieval route.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tracing::instrument;

use talehub_core::error::DomainError;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /media/{id}
#[instrument(skip(state))]
async fn serve_blob(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let blob = state
        .blobs
        .fetch(&id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("media/{id}")))?;

    Ok(([(header::CONTENT_TYPE, blob.content_type)], blob.bytes).into_response())
}

/// Returns the media router.
pub fn router() -> Router<AppState> {
    Router::new().route("/media/{id}", get(serve_blob))
}
