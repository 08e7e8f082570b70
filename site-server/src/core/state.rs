use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::repository::{AdminUserRepository, SiteSettingsRepository};
use crate::db::DbService;
use crate::events::{EventBus, SyncEvent};
use crate::services::ImageStorage;
use crate::utils::AppError;

/// Per-resource monotonic version counters.
///
/// Versions are attached to sync events so subscribers can order them
/// after a reconnect. Counters reset on restart; subscribers treat a
/// lower version than last seen as a signal to refetch.
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// Increment the counter for a resource, returning the new value
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared server state. Cloning is cheap; all heavy members are shared.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub storage: ImageStorage,
    pub jwt_service: Arc<JwtService>,
    pub events: EventBus,
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// Initialize state from configuration: working directory layout,
    /// database, then the singleton rows the site depends on.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_service = DbService::new(&config.database_dir().join("site.db")).await?;

        let state = Self::with_db(config.clone(), db_service.db).await?;
        Ok(state)
    }

    /// Build state around an existing database handle. Tests use this
    /// with an in-memory database.
    pub async fn with_db(config: Config, db: Surreal<Db>) -> Result<Self, AppError> {
        let storage = ImageStorage::new(&PathBuf::from(&config.work_dir));
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let state = Self {
            config,
            db,
            storage,
            jwt_service,
            events: EventBus::new(),
            resource_versions: Arc::new(ResourceVersions::new()),
        };

        state.seed().await?;
        Ok(state)
    }

    /// Ensure the settings singleton and the default admin account exist
    async fn seed(&self) -> Result<(), AppError> {
        SiteSettingsRepository::new(self.db.clone())
            .get_or_create()
            .await?;

        if let Some(password) = &self.config.admin_password {
            AdminUserRepository::new(self.db.clone())
                .ensure_default(&self.config.admin_username, password)
                .await?;
        } else if self.config.is_production() {
            tracing::warn!("ADMIN_PASSWORD not set, no admin account seeded");
        } else {
            AdminUserRepository::new(self.db.clone())
                .ensure_default(&self.config.admin_username, "admin")
                .await?;
        }

        Ok(())
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Publish a resource change to SSE subscribers.
    ///
    /// `data` carries the post-change row and is None for deletions.
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let version = self.resource_versions.increment(resource);
        self.events.publish(SyncEvent {
            resource: resource.to_string(),
            action: action.to_string(),
            id: id.to_string(),
            version,
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        });
    }
}
