//! Image Upload Route
//!
//! Bare upload that returns a URL for use in a menu item's image field.
//! Gallery uploads go through /api/gallery instead, which also inserts
//! the row.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::api::multipart::{extension_of, read_file_field, UPLOAD_BODY_LIMIT};
use crate::core::ServerState;
use crate::utils::{ok, AppResponse, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/upload", post(upload))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub url: String,
    pub size: usize,
    /// True when an identical image was already stored
    pub deduplicated: bool,
}

/// POST /api/upload
async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<UploadResponse>>> {
    let (data, filename) = read_file_field(&mut multipart).await?;
    let ext = extension_of(&filename)?;

    let stored = state.storage.save(&data, &ext)?;

    tracing::info!(
        original_name = %filename,
        stored = %stored.filename,
        size = stored.size,
        "Image uploaded"
    );

    Ok(ok(UploadResponse {
        filename: stored.filename,
        url: stored.url,
        size: stored.size,
        deduplicated: stored.deduplicated,
    }))
}
