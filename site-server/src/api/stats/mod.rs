//! Dashboard Stats Route

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/stats", get(stats))
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub menu_items: usize,
    pub categories: usize,
    pub gallery_images: usize,
    pub reviews: usize,
}

/// GET /api/stats - row counts for the admin dashboard
async fn stats(State(state): State<ServerState>) -> AppResult<Json<StatsResponse>> {
    let db = state.get_db();

    let mut response = db
        .query("SELECT count() FROM menu_item GROUP ALL")
        .query("SELECT count() FROM category GROUP ALL")
        .query("SELECT count() FROM gallery_image GROUP ALL")
        .query("SELECT count() FROM review GROUP ALL")
        .await
        .map_err(|e| AppError::database(format!("Stats query failed: {}", e)))?;

    #[derive(serde::Deserialize)]
    struct CountRow {
        count: usize,
    }

    let mut take_count = |idx: usize| -> Result<usize, AppError> {
        let row: Option<CountRow> = response
            .take(idx)
            .map_err(|e| AppError::database(format!("Failed to read count: {}", e)))?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    };

    Ok(Json(StatsResponse {
        menu_items: take_count(0)?,
        categories: take_count(1)?,
        gallery_images: take_count(2)?,
        reviews: take_count(3)?,
    }))
}
