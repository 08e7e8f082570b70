//! Today's Specials Route
//!
//! Public read of the currently active specials. Expired markings are
//! filtered out here; nothing in the store changes on expiry.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;

use crate::api::menu_items::MenuItemView;
use crate::core::ServerState;
use crate::db::repository::MenuItemRepository;
use crate::menu;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/specials", get(list_active))
}

/// GET /api/specials
async fn list_active(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItemView>>> {
    let repo = MenuItemRepository::new(state.get_db());
    let items = repo.find_available_with_categories().await?;

    let now = Utc::now();
    let specials = items
        .into_iter()
        .filter(|item| menu::evaluate(item.special_marked_at(), now).is_active())
        .map(MenuItemView::from_item)
        .collect();

    Ok(Json(specials))
}
