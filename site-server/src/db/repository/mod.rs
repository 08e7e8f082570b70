//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables. One repository per
//! table, sharing a [`BaseRepository`] database handle.

pub mod admin_user;
pub mod category;
pub mod gallery_image;
pub mod menu_item;
pub mod review;
pub mod site_settings;

pub use admin_user::AdminUserRepository;
pub use category::CategoryRepository;
pub use gallery_image::GalleryImageRepository;
pub use menu_item::MenuItemRepository;
pub use review::ReviewRepository;
pub use site_settings::SiteSettingsRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Access denied: {0}")]
    Denied(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Access-policy denial is surfaced separately so the API layer can
        // attach a remediation hint instead of a generic database error.
        let lowered = msg.to_lowercase();
        if lowered.contains("permission") || lowered.contains("not allowed") {
            RepoError::Denied(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build a RecordId from either a bare key or a "table:key" string
pub fn make_record_id(table: &str, id: &str) -> surrealdb::RecordId {
    match id.split_once(':') {
        Some((t, key)) if t == table => surrealdb::RecordId::from_table_key(table, key),
        _ => surrealdb::RecordId::from_table_key(table, id),
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
