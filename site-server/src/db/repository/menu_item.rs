//! Menu Item Repository
//!
//! Owns the `menu_item` table and the `in_category` junction edges. Category
//! membership is never written onto the item row; it lives only in the edges
//! and is projected onto the read models.

use super::{BaseRepository, RepoError, RepoResult, make_record_id};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuItemWithCategories};
use crate::utils::time::now_rfc3339;
use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";
const EDGE_TABLE: &str = "in_category";
const CATEGORY_TABLE: &str = "category";

/// Projection shared by all flattened reads
const FLAT_FIELDS: &str =
    "*, ->in_category->category AS category_ids, ->in_category->category.name AS category_names";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menu items with category links flattened
    pub async fn find_all_with_categories(&self) -> RepoResult<Vec<MenuItemWithCategories>> {
        let items: Vec<MenuItemWithCategories> = self
            .base
            .db()
            .query(format!("SELECT {FLAT_FIELDS} FROM menu_item ORDER BY name"))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find available menu items with category links flattened
    pub async fn find_available_with_categories(&self) -> RepoResult<Vec<MenuItemWithCategories>> {
        let items: Vec<MenuItemWithCategories> = self
            .base
            .db()
            .query(format!(
                "SELECT {FLAT_FIELDS} FROM menu_item WHERE is_available = true ORDER BY name"
            ))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find one menu item, raw row
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let record = make_record_id(TABLE, id);
        let item: Option<MenuItem> = self.base.db().select(record).await?;
        Ok(item)
    }

    /// Find one menu item with category links flattened
    pub async fn find_by_id_with_categories(
        &self,
        id: &str,
    ) -> RepoResult<Option<MenuItemWithCategories>> {
        let record = make_record_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {FLAT_FIELDS} FROM menu_item WHERE id = $id"))
            .bind(("id", record))
            .await?;
        let items: Vec<MenuItemWithCategories> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Create a new menu item row (junction edges are reconciled separately)
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let price = data
            .price
            .ok_or_else(|| RepoError::Validation("price is required".into()))?;

        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            price,
            offer_price: data.offer_price,
            offer_text: data.offer_text,
            image_url: data.image_url,
            is_available: data.is_available.unwrap_or(true),
            today_special_at: None,
            created_at: Some(now_rfc3339()),
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item row
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let record = make_record_id(TABLE, id);

        // Build dynamic SET clauses with typed bindings
        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.offer_price.is_some() {
            set_parts.push("offer_price = $offer_price");
        }
        if data.offer_text.is_some() {
            set_parts.push("offer_text = $offer_text");
        }
        if data.image_url.is_some() {
            set_parts.push("image_url = $image_url");
        }
        if data.is_available.is_some() {
            set_parts.push("is_available = $is_available");
        }

        if set_parts.is_empty() {
            // No row fields to update (a categories-only edit lands here)
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)));
        }

        let query_str = format!("UPDATE $record SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self.base.db().query(query_str).bind(("record", record));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.offer_price {
            // Inner None clears the offer
            query = query.bind(("offer_price", v));
        }
        if let Some(v) = data.offer_text {
            query = query.bind(("offer_text", v));
        }
        if let Some(v) = data.image_url {
            query = query.bind(("image_url", v));
        }
        if let Some(v) = data.is_available {
            query = query.bind(("is_available", v));
        }

        let mut result = query.await?;
        let items: Vec<MenuItem> = result.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item (junction edges removed first)
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record = make_record_id(TABLE, id);

        self.base
            .db()
            .query("DELETE in_category WHERE in = $item")
            .bind(("item", record.clone()))
            .await?;

        let deleted: Option<MenuItem> = self.base.db().delete(record).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Menu item {} not found", id)));
        }
        Ok(())
    }

    /// Set or clear the today's-special timestamp
    ///
    /// Toggling on stores the current time (restarting the 24h window);
    /// toggling off clears the timestamp. The active/expired state is never
    /// stored, only derived from this field.
    pub async fn set_special(&self, id: &str, marked_at: Option<String>) -> RepoResult<MenuItem> {
        let record = make_record_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $record SET today_special_at = $marked_at RETURN AFTER")
            .bind(("record", record))
            .bind(("marked_at", marked_at))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Reconcile the item's junction edges to exactly the target category set.
    ///
    /// Computes the delta against the current edge set and applies it inside
    /// one transaction, so a mid-sequence failure can never strand the item
    /// with zero categories.
    pub async fn set_categories(&self, id: &str, category_ids: &[String]) -> RepoResult<()> {
        let item = make_record_id(TABLE, id);

        // Current edge targets
        #[derive(Deserialize)]
        struct EdgeRow {
            out: RecordId,
        }
        let mut result = self
            .base
            .db()
            .query("SELECT out FROM in_category WHERE in = $item")
            .bind(("item", item.clone()))
            .await?;
        let current: Vec<EdgeRow> = result.take(0)?;
        let current: Vec<RecordId> = current.into_iter().map(|e| e.out).collect();

        // Deduplicated target set
        let mut target: Vec<RecordId> = Vec::new();
        for cid in category_ids {
            let record = make_record_id(CATEGORY_TABLE, cid);
            if !target.contains(&record) {
                target.push(record);
            }
        }

        let to_remove: Vec<RecordId> = current
            .iter()
            .filter(|c| !target.contains(c))
            .cloned()
            .collect();
        let to_add: Vec<RecordId> = target
            .into_iter()
            .filter(|t| !current.contains(t))
            .collect();

        if to_remove.is_empty() && to_add.is_empty() {
            return Ok(());
        }

        let mut statements = vec!["BEGIN TRANSACTION".to_string()];
        if !to_remove.is_empty() {
            statements
                .push(format!("DELETE {EDGE_TABLE} WHERE in = $item AND out IN $remove"));
        }
        if !to_add.is_empty() {
            statements.push(format!("RELATE $item->{EDGE_TABLE}->$add"));
        }
        statements.push("COMMIT TRANSACTION".to_string());

        let mut query = self
            .base
            .db()
            .query(statements.join(";\n"))
            .bind(("item", item));
        if !to_remove.is_empty() {
            query = query.bind(("remove", to_remove));
        }
        if !to_add.is_empty() {
            query = query.bind(("add", to_add));
        }

        query.await?.check()?;
        Ok(())
    }
}
