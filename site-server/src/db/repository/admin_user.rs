//! Admin User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AdminUser, AdminUserCreate};
use crate::utils::time::now_rfc3339;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

const TABLE: &str = "admin_user";

#[derive(Clone)]
pub struct AdminUserRepository {
    base: BaseRepository,
}

impl AdminUserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<AdminUser>> {
        let sql = format!("SELECT * FROM {} WHERE username = $username LIMIT 1", TABLE);
        let mut response = self
            .base
            .db()
            .query(sql)
            .bind(("username", username.to_string()))
            .await?;
        let user: Option<AdminUser> = response.take(0)?;
        Ok(user)
    }

    pub async fn create(&self, data: AdminUserCreate) -> RepoResult<AdminUser> {
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        let hash_pass = AdminUser::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))?;

        // hash_pass is skip_serializing on the model, so the row is written
        // with an explicit SET instead of content()
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE admin_user SET
                    username = $username,
                    hash_pass = $hash_pass,
                    is_active = true,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("username", data.username))
            .bind(("hash_pass", hash_pass))
            .bind(("created_at", now_rfc3339()))
            .await?;

        let created: Option<AdminUser> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create admin user".to_string()))
    }

    /// Seed the default admin account if no user with that name exists yet
    pub async fn ensure_default(&self, username: &str, password: &str) -> RepoResult<()> {
        if self.find_by_username(username).await?.is_none() {
            self.create(AdminUserCreate {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;
            tracing::info!("Seeded default admin user '{}'", username);
        }
        Ok(())
    }
}
