//! Menu Item API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::view::MenuItemView;
use crate::core::ServerState;
use crate::db::models::{MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::menu::{self, CategorySelection};
use crate::utils::time::now_rfc3339;
use crate::utils::validation::{
    validate_optional_text, validate_required_text, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN,
    MAX_TEXT_LEN, MAX_URL_LEN,
};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "menu_item";

#[derive(Debug, Deserialize, Default)]
pub struct MenuQuery {
    /// Category id, or absent/"All" for no category filter
    pub category: Option<String>,
    /// Case-insensitive substring matched against name or description
    pub search: Option<String>,
    /// The back-office passes true to manage hidden items
    #[serde(default)]
    pub include_unavailable: bool,
}

/// GET /api/menu - flattened menu items with derived special status
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<MenuItemView>>> {
    let repo = MenuItemRepository::new(state.get_db());
    let items = if query.include_unavailable {
        repo.find_all_with_categories().await?
    } else {
        repo.find_available_with_categories().await?
    };

    let selection = CategorySelection::from_query(query.category.as_deref());
    let filtered = menu::filter_items(items, &selection, query.search.as_deref().unwrap_or(""));

    Ok(Json(filtered.into_iter().map(MenuItemView::from_item).collect()))
}

/// GET /api/menu/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItemView>> {
    let item = fetch_view(&state, &id).await?;
    Ok(Json(item))
}

fn validate_payload_texts(
    description: &Option<String>,
    offer_text: &Option<String>,
    image_url: &Option<String>,
) -> Result<(), AppError> {
    validate_optional_text(description, "description", MAX_TEXT_LEN)?;
    validate_optional_text(offer_text, "offer_text", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(image_url, "image_url", MAX_URL_LEN)?;
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price <= Decimal::ZERO {
        return Err(AppError::validation(format!(
            "price must be positive, got {price}"
        )));
    }
    Ok(())
}

/// POST /api/menu
///
/// Requires a name, a positive price, and at least one category. The
/// category links are written after the row and the flattened result is
/// re-read so the response reflects exactly what was stored.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItemView>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    let price = payload
        .price
        .ok_or_else(|| AppError::validation("price is required".to_string()))?;
    validate_price(price)?;
    if payload.category_ids.is_empty() {
        return Err(AppError::validation(
            "At least one category is required".to_string(),
        ));
    }
    validate_payload_texts(&payload.description, &payload.offer_text, &payload.image_url)?;

    let repo = MenuItemRepository::new(state.get_db());
    let category_ids = payload.category_ids.clone();
    let created = repo.create(payload).await?;

    let id = created.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    repo.set_categories(&id, &category_ids).await?;

    let view = fetch_view(&state, &id).await?;
    state.broadcast_sync(RESOURCE, "created", &id, Some(&view));

    Ok(Json(view))
}

/// PUT /api/menu/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItemView>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    if let Some(ids) = &payload.category_ids
        && ids.is_empty()
    {
        return Err(AppError::validation(
            "At least one category is required".to_string(),
        ));
    }
    validate_optional_text(&payload.description, "description", MAX_TEXT_LEN)?;
    if let Some(offer_text) = &payload.offer_text {
        validate_optional_text(offer_text, "offer_text", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;

    let repo = MenuItemRepository::new(state.get_db());
    let category_ids = payload.category_ids.clone();
    repo.update(&id, payload).await?;

    if let Some(ids) = category_ids {
        repo.set_categories(&id, &ids).await?;
    }

    let view = fetch_view(&state, &id).await?;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&view));

    Ok(Json(view))
}

/// DELETE /api/menu/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.get_db());
    repo.delete(&id).await?;

    state.broadcast_sync::<()>(RESOURCE, "deleted", &id, None);

    Ok(Json(true))
}

/// POST /api/menu/{id}/special - mark as today's special from now
pub async fn mark_special(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItemView>> {
    let repo = MenuItemRepository::new(state.get_db());
    repo.set_special(&id, Some(now_rfc3339())).await?;

    let view = fetch_view(&state, &id).await?;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&view));

    Ok(Json(view))
}

/// DELETE /api/menu/{id}/special - clear the marking
pub async fn unmark_special(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItemView>> {
    let repo = MenuItemRepository::new(state.get_db());
    repo.set_special(&id, None).await?;

    let view = fetch_view(&state, &id).await?;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&view));

    Ok(Json(view))
}

async fn fetch_view(state: &ServerState, id: &str) -> Result<MenuItemView, AppError> {
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo
        .find_by_id_with_categories(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(MenuItemView::from_item(item))
}
