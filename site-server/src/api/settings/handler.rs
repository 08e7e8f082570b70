//! Site Settings Handlers

use axum::{extract::State, Json};

use crate::core::ServerState;
use crate::db::models::{SiteSettings, SiteSettingsUpdate};
use crate::db::repository::SiteSettingsRepository;
use crate::utils::validation::{validate_optional_text, MAX_SHORT_TEXT_LEN, MAX_TEXT_LEN};
use crate::utils::AppResult;

const RESOURCE: &str = "settings";

/// GET /api/settings
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<SiteSettings>> {
    let repo = SiteSettingsRepository::new(state.get_db());
    let settings = repo.get_or_create().await?;
    Ok(Json(settings))
}

/// PUT /api/settings - merge-update, returns the authoritative row
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<SiteSettingsUpdate>,
) -> AppResult<Json<SiteSettings>> {
    validate_optional_text(&payload.opening_hours, "opening_hours", MAX_TEXT_LEN)?;
    validate_optional_text(&payload.closed_days, "closed_days", MAX_SHORT_TEXT_LEN)?;
    if let Some(reopening) = &payload.reopening_date {
        validate_optional_text(reopening, "reopening_date", MAX_SHORT_TEXT_LEN)?;
    }

    let repo = SiteSettingsRepository::new(state.get_db());
    let settings = repo.update(payload).await?;

    state.broadcast_sync(RESOURCE, "updated", "site_settings:main", Some(&settings));

    Ok(Json(settings))
}
