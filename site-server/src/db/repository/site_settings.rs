//! Site Settings Repository (Singleton)

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{SiteSettings, SiteSettingsUpdate};
use crate::utils::time::now_rfc3339;
use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "site_settings";
const SINGLETON_ID: &str = "main";

#[derive(Clone)]
pub struct SiteSettingsRepository {
    base: BaseRepository,
}

impl SiteSettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Get or create the singleton settings row
    pub async fn get_or_create(&self) -> RepoResult<SiteSettings> {
        if let Some(settings) = self.get().await? {
            return Ok(settings);
        }

        let settings = SiteSettings::default();
        let created: Option<SiteSettings> = self
            .base
            .db()
            .create((TABLE, SINGLETON_ID))
            .content(settings)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create site settings".to_string()))
    }

    /// Get the singleton settings row
    pub async fn get(&self) -> RepoResult<Option<SiteSettings>> {
        let settings: Option<SiteSettings> =
            self.base.db().select((TABLE, SINGLETON_ID)).await?;
        Ok(settings)
    }

    /// Merge-update the singleton row and return the post-commit state.
    ///
    /// The returned row is authoritative: a failed update returns an error
    /// and changes nothing, so callers never render an unpersisted value.
    pub async fn update(&self, data: SiteSettingsUpdate) -> RepoResult<SiteSettings> {
        // Ensure the singleton exists
        self.get_or_create().await?;

        // Flatten the double-Option date so the merge writes an explicit null
        #[derive(Serialize)]
        struct SettingsMerge {
            #[serde(skip_serializing_if = "Option::is_none")]
            opening_hours: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_closed: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            reopening_date: Option<Option<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            closed_days: Option<String>,
            updated_at: String,
        }

        let merge = SettingsMerge {
            opening_hours: data.opening_hours,
            is_closed: data.is_closed,
            reopening_date: data.reopening_date,
            closed_days: data.closed_days,
            updated_at: now_rfc3339(),
        };

        let singleton_id = RecordId::from_table_key(TABLE, SINGLETON_ID);
        let updated: Option<SiteSettings> =
            self.base.db().update(singleton_id).merge(merge).await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update site settings".to_string()))
    }
}
