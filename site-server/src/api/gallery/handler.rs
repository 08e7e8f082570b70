//! Gallery API Handlers
//!
//! Uploads store the file first, then insert the row; a failed insert
//! leaves an orphan file at worst, never a row without a file. Deletes go
//! the other way: row first, then the stored file.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use crate::api::multipart::{extension_of, read_file_field};
use crate::core::ServerState;
use crate::db::models::{GalleryImage, GalleryImageCreate};
use crate::db::repository::GalleryImageRepository;
use crate::services::ImageStorage;
use crate::utils::AppResult;

const RESOURCE: &str = "gallery";

/// GET /api/gallery - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<GalleryImage>>> {
    let repo = GalleryImageRepository::new(state.get_db());
    let images = repo.find_all().await?;
    Ok(Json(images))
}

/// POST /api/gallery - multipart upload, stores the file and inserts a row
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<GalleryImage>> {
    let (data, filename) = read_file_field(&mut multipart).await?;
    let ext = extension_of(&filename)?;

    let stored = state.storage.save(&data, &ext)?;

    let repo = GalleryImageRepository::new(state.get_db());
    let image = repo
        .create(GalleryImageCreate {
            image_url: stored.url,
        })
        .await?;

    let id = image.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&image));

    Ok(Json(image))
}

/// DELETE /api/gallery/{id} - removes the row, then its stored file
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = GalleryImageRepository::new(state.get_db());
    let deleted = repo.delete(&id).await?;

    if let Some(filename) = ImageStorage::filename_from_url(&deleted.image_url) {
        state.storage.delete(filename)?;
    }

    state.broadcast_sync::<()>(RESOURCE, "deleted", &id, None);

    Ok(Json(true))
}
