//! Menu Item Model
//!
//! `today_special_at` is the only state behind the "today's special" flag:
//! the active/expired status is derived from it at read time and never
//! stored as a boolean.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    /// Takes effect only when strictly below `price`
    #[serde(default)]
    pub offer_price: Option<Decimal>,
    /// Optional promotional label ("20% off", "Weekend deal")
    #[serde(default)]
    pub offer_text: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_available: bool,
    /// RFC 3339 timestamp of when the item was marked as today's special
    #[serde(default)]
    pub today_special_at: Option<String>,
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Parse the special-marking timestamp, treating unparseable values as unset
    pub fn special_marked_at(&self) -> Option<DateTime<Utc>> {
        self.today_special_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default)]
    pub offer_price: Option<Decimal>,
    #[serde(default)]
    pub offer_text: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    /// Target category set; junction rows are reconciled after the row write
    #[serde(default)]
    pub category_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Double Option: outer None = untouched, inner None = clear the offer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_price: Option<Option<Decimal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_text: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    /// When present, the junction rows are reconciled to exactly this set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
}

/// Menu item joined with its category links, as projected by the read queries.
///
/// Category membership is always read through the junction; names whose
/// category link no longer resolves are dropped while the raw ids are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemWithCategories {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub offer_price: Option<Decimal>,
    #[serde(default)]
    pub offer_text: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_available: bool,
    #[serde(default)]
    pub today_special_at: Option<String>,
    pub created_at: Option<String>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub category_ids: Vec<RecordId>,
    #[serde(default)]
    category_names: Vec<Option<String>>,
}

impl MenuItemWithCategories {
    /// Resolved category names (unresolvable links dropped)
    pub fn category_names(&self) -> Vec<String> {
        self.category_names.iter().flatten().cloned().collect()
    }

    /// Parse the special-marking timestamp, treating unparseable values as unset
    pub fn special_marked_at(&self) -> Option<DateTime<Utc>> {
        self.today_special_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether the item belongs to the given category id ("category:x" form)
    pub fn has_category(&self, category_id: &str) -> bool {
        self.category_ids.iter().any(|c| c.to_string() == category_id)
    }

    #[cfg(test)]
    pub fn for_tests(
        name: &str,
        description: Option<&str>,
        price: Decimal,
        category_keys: &[&str],
    ) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description: description.map(str::to_string),
            price,
            offer_price: None,
            offer_text: None,
            image_url: None,
            is_available: true,
            today_special_at: None,
            created_at: None,
            category_ids: category_keys
                .iter()
                .map(|k| RecordId::from_table_key("category", *k))
                .collect(),
            category_names: Vec::new(),
        }
    }
}
