//! Gallery Image Repository

use super::{BaseRepository, RepoError, RepoResult, make_record_id};
use crate::db::models::{GalleryImage, GalleryImageCreate};
use crate::utils::time::now_rfc3339;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "gallery_image";

#[derive(Clone)]
pub struct GalleryImageRepository {
    base: BaseRepository,
}

impl GalleryImageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all gallery images, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<GalleryImage>> {
        let images: Vec<GalleryImage> = self
            .base
            .db()
            .query("SELECT * FROM gallery_image ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(images)
    }

    /// Find gallery image by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<GalleryImage>> {
        let record = make_record_id(TABLE, id);
        let image: Option<GalleryImage> = self.base.db().select(record).await?;
        Ok(image)
    }

    /// Insert a gallery row for an already-stored image
    pub async fn create(&self, data: GalleryImageCreate) -> RepoResult<GalleryImage> {
        let image = GalleryImage {
            id: None,
            image_url: data.image_url,
            created_at: Some(now_rfc3339()),
        };

        let created: Option<GalleryImage> = self.base.db().create(TABLE).content(image).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create gallery image".to_string()))
    }

    /// Hard delete a gallery row, returning it so the caller can remove the
    /// stored file as well
    pub async fn delete(&self, id: &str) -> RepoResult<GalleryImage> {
        let record = make_record_id(TABLE, id);
        let deleted: Option<GalleryImage> = self.base.db().delete(record).await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("Gallery image {} not found", id)))
    }
}
