//! Review API Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::ServerState;
use crate::db::models::{Review, ReviewCreate};
use crate::db::repository::ReviewRepository;
use crate::utils::validation::{
    validate_optional_text, validate_rating, validate_required_text, MAX_NAME_LEN, MAX_TEXT_LEN,
};
use crate::utils::AppResult;

const RESOURCE: &str = "review";

/// GET /api/reviews - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Review>>> {
    let repo = ReviewRepository::new(state.get_db());
    let reviews = repo.find_all().await?;
    Ok(Json(reviews))
}

/// POST /api/reviews
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<Json<Review>> {
    validate_required_text(&payload.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_rating(payload.rating)?;
    validate_optional_text(&payload.comment, "comment", MAX_TEXT_LEN)?;

    let repo = ReviewRepository::new(state.get_db());
    let review = repo.create(payload).await?;

    let id = review.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&review));

    Ok(Json(review))
}

/// DELETE /api/reviews/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ReviewRepository::new(state.get_db());
    repo.delete(&id).await?;

    state.broadcast_sync::<()>(RESOURCE, "deleted", &id, None);

    Ok(Json(true))
}
