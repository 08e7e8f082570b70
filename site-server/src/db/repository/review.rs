//! Review Repository

use super::{BaseRepository, RepoError, RepoResult, make_record_id};
use crate::db::models::{Review, ReviewCreate};
use crate::utils::time::now_rfc3339;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "review";

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all reviews, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(reviews)
    }

    /// Create a new review (rating is validated at the API layer)
    pub async fn create(&self, data: ReviewCreate) -> RepoResult<Review> {
        let review = Review {
            id: None,
            customer_name: data.customer_name,
            rating: data.rating,
            comment: data.comment,
            created_at: Some(now_rfc3339()),
        };

        let created: Option<Review> = self.base.db().create(TABLE).content(review).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create review".to_string()))
    }

    /// Hard delete a review
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record = make_record_id(TABLE, id);
        let deleted: Option<Review> = self.base.db().delete(record).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Review {} not found", id)));
        }
        Ok(())
    }
}
