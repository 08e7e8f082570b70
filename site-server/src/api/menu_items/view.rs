//! Menu item read model
//!
//! What the HTTP surface returns for menu items: the flattened row plus
//! the derived special status and price display, evaluated at read time.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::models::MenuItemWithCategories;
use crate::menu::{self, PriceDisplay, SpecialStatus};

#[derive(Debug, Serialize)]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_available: bool,
    pub category_ids: Vec<String>,
    pub category_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_special_at: Option<String>,
    pub is_today_special: bool,
    /// Countdown label while the special is active ("3h 20m remaining")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_remaining: Option<String>,
    pub price_display: PriceDisplay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl MenuItemView {
    pub fn from_item(item: MenuItemWithCategories) -> Self {
        let status = menu::evaluate(item.special_marked_at(), Utc::now());
        let price_display =
            menu::price_display(item.price, item.offer_price, item.offer_text.as_deref());

        Self {
            id: item.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            category_ids: item.category_ids.iter().map(|c| c.to_string()).collect(),
            category_names: item.category_names(),
            is_today_special: status.is_active(),
            special_remaining: match status {
                SpecialStatus::Active { .. } => Some(status.label()),
                _ => None,
            },
            price_display,
            name: item.name,
            description: item.description,
            price: item.price,
            offer_price: item.offer_price,
            offer_text: item.offer_text,
            image_url: item.image_url,
            is_available: item.is_available,
            today_special_at: item.today_special_at,
            created_at: item.created_at,
        }
    }
}
