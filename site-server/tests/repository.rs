//! Repository integration tests against an in-memory database.
//! Run: cargo test -p site-server --test repository

use rust_decimal::Decimal;
use site_server::db::models::{
    CategoryCreate, CategoryUpdate, GalleryImageCreate, MenuItemCreate, MenuItemUpdate,
    ReviewCreate, SiteSettingsUpdate,
};
use site_server::db::repository::{
    CategoryRepository, GalleryImageRepository, MenuItemRepository, RepoError, ReviewRepository,
    SiteSettingsRepository,
};
use site_server::db::DbService;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

async fn test_db() -> Surreal<Db> {
    DbService::memory().await.unwrap().db
}

fn item_create(name: &str, price_cents: i64) -> MenuItemCreate {
    MenuItemCreate {
        name: name.to_string(),
        description: None,
        price: Some(Decimal::new(price_cents, 2)),
        offer_price: None,
        offer_text: None,
        image_url: None,
        is_available: None,
        category_ids: Vec::new(),
    }
}

fn key_of(id: &Option<surrealdb::RecordId>) -> String {
    id.as_ref().unwrap().key().to_string()
}

#[tokio::test]
async fn category_reconciliation_applies_exact_delta() {
    let db = test_db().await;
    let categories = CategoryRepository::new(db.clone());
    let items = MenuItemRepository::new(db.clone());

    let a = categories
        .create(CategoryCreate { name: "Breakfast".into() })
        .await
        .unwrap();
    let b = categories
        .create(CategoryCreate { name: "Lunch".into() })
        .await
        .unwrap();
    let c = categories
        .create(CategoryCreate { name: "Dinner".into() })
        .await
        .unwrap();

    let item = items.create(item_create("Dosa", 850)).await.unwrap();
    let item_id = key_of(&item.id);

    // Start with {A, C}
    items
        .set_categories(&item_id, &[key_of(&a.id), key_of(&c.id)])
        .await
        .unwrap();

    // Reconcile to {A, B}
    items
        .set_categories(&item_id, &[key_of(&a.id), key_of(&b.id)])
        .await
        .unwrap();

    let flat = items
        .find_by_id_with_categories(&item_id)
        .await
        .unwrap()
        .unwrap();

    let mut names = flat.category_names();
    names.sort();
    assert_eq!(names, vec!["Breakfast".to_string(), "Lunch".to_string()]);
    assert_eq!(flat.category_ids.len(), 2);
}

#[tokio::test]
async fn reconciliation_with_no_delta_is_a_noop() {
    let db = test_db().await;
    let categories = CategoryRepository::new(db.clone());
    let items = MenuItemRepository::new(db.clone());

    let a = categories
        .create(CategoryCreate { name: "Tea".into() })
        .await
        .unwrap();
    let item = items.create(item_create("Masala Chai", 250)).await.unwrap();
    let item_id = key_of(&item.id);

    items.set_categories(&item_id, &[key_of(&a.id)]).await.unwrap();
    items.set_categories(&item_id, &[key_of(&a.id)]).await.unwrap();

    let flat = items
        .find_by_id_with_categories(&item_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(flat.category_ids.len(), 1);
    assert_eq!(flat.category_names(), vec!["Tea".to_string()]);
}

#[tokio::test]
async fn special_toggle_on_then_off_restores_null() {
    let db = test_db().await;
    let items = MenuItemRepository::new(db);

    let item = items.create(item_create("Biryani", 1200)).await.unwrap();
    let item_id = key_of(&item.id);
    assert!(item.today_special_at.is_none());

    let marked = items
        .set_special(&item_id, Some("2025-06-15T12:00:00Z".to_string()))
        .await
        .unwrap();
    assert_eq!(
        marked.today_special_at.as_deref(),
        Some("2025-06-15T12:00:00Z")
    );
    assert!(marked.special_marked_at().is_some());

    let cleared = items.set_special(&item_id, None).await.unwrap();
    assert!(cleared.today_special_at.is_none());
}

#[tokio::test]
async fn category_delete_cleans_junction_edges() {
    let db = test_db().await;
    let categories = CategoryRepository::new(db.clone());
    let items = MenuItemRepository::new(db.clone());

    let a = categories
        .create(CategoryCreate { name: "Snacks".into() })
        .await
        .unwrap();
    let b = categories
        .create(CategoryCreate { name: "Drinks".into() })
        .await
        .unwrap();

    let item = items.create(item_create("Samosa", 300)).await.unwrap();
    let item_id = key_of(&item.id);
    items
        .set_categories(&item_id, &[key_of(&a.id), key_of(&b.id)])
        .await
        .unwrap();

    assert!(categories.delete(&key_of(&a.id)).await.unwrap());

    let flat = items
        .find_by_id_with_categories(&item_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(flat.category_ids.len(), 1);
    assert_eq!(flat.category_names(), vec!["Drinks".to_string()]);
}

#[tokio::test]
async fn menu_item_delete_removes_its_edges() {
    let db = test_db().await;
    let categories = CategoryRepository::new(db.clone());
    let items = MenuItemRepository::new(db.clone());

    let a = categories
        .create(CategoryCreate { name: "Rice".into() })
        .await
        .unwrap();
    let item = items.create(item_create("Lemon Rice", 800)).await.unwrap();
    let item_id = key_of(&item.id);
    items.set_categories(&item_id, &[key_of(&a.id)]).await.unwrap();

    items.delete(&item_id).await.unwrap();

    let mut result = db
        .query("SELECT count() FROM in_category GROUP ALL")
        .await
        .unwrap();
    #[derive(serde::Deserialize)]
    struct CountRow {
        count: usize,
    }
    let row: Option<CountRow> = result.take(0).unwrap();
    assert_eq!(row.map(|r| r.count).unwrap_or(0), 0);
}

#[tokio::test]
async fn duplicate_category_name_is_rejected() {
    let db = test_db().await;
    let categories = CategoryRepository::new(db);

    categories
        .create(CategoryCreate { name: "Desserts".into() })
        .await
        .unwrap();
    let err = categories
        .create(CategoryCreate { name: "Desserts".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn category_rename_checks_duplicates() {
    let db = test_db().await;
    let categories = CategoryRepository::new(db);

    let a = categories
        .create(CategoryCreate { name: "Starters".into() })
        .await
        .unwrap();
    categories
        .create(CategoryCreate { name: "Mains".into() })
        .await
        .unwrap();

    let err = categories
        .update(&key_of(&a.id), CategoryUpdate { name: Some("Mains".into()) })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn menu_item_create_requires_price() {
    let db = test_db().await;
    let items = MenuItemRepository::new(db);

    let mut create = item_create("Mystery Dish", 0);
    create.price = None;
    let err = items.create(create).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn menu_item_update_clears_offer_with_inner_none() {
    let db = test_db().await;
    let items = MenuItemRepository::new(db);

    let mut create = item_create("Thali", 1500);
    create.offer_price = Some(Decimal::new(1200, 2));
    let item = items.create(create).await.unwrap();
    let item_id = key_of(&item.id);
    assert!(item.offer_price.is_some());

    let updated = items
        .update(
            &item_id,
            MenuItemUpdate {
                offer_price: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.offer_price.is_none());
    // Untouched fields survive
    assert_eq!(updated.name, "Thali");
    assert_eq!(updated.price, Decimal::new(1500, 2));
}

#[tokio::test]
async fn settings_update_persists_and_preserves_date_format() {
    let db = test_db().await;
    let settings = SiteSettingsRepository::new(db);

    let initial = settings.get_or_create().await.unwrap();
    assert!(!initial.is_closed);

    let updated = settings
        .update(SiteSettingsUpdate {
            opening_hours: None,
            is_closed: Some(true),
            reopening_date: Some(Some("2025-07-01".to_string())),
            closed_days: None,
        })
        .await
        .unwrap();
    assert!(updated.is_closed);
    // Stored verbatim, not normalized to a datetime
    assert_eq!(updated.reopening_date.as_deref(), Some("2025-07-01"));
    assert_eq!(updated.opening_hours, initial.opening_hours);

    // Reopen: clear the date with an explicit null
    let reopened = settings
        .update(SiteSettingsUpdate {
            opening_hours: None,
            is_closed: Some(false),
            reopening_date: Some(None),
            closed_days: None,
        })
        .await
        .unwrap();
    assert!(!reopened.is_closed);
    assert!(reopened.reopening_date.is_none());
}

#[tokio::test]
async fn settings_singleton_is_stable() {
    let db = test_db().await;
    let settings = SiteSettingsRepository::new(db.clone());

    let first = settings.get_or_create().await.unwrap();
    let second = settings.get_or_create().await.unwrap();
    assert_eq!(first.id, second.id);

    let mut result = db
        .query("SELECT count() FROM site_settings GROUP ALL")
        .await
        .unwrap();
    #[derive(serde::Deserialize)]
    struct CountRow {
        count: usize,
    }
    let row: Option<CountRow> = result.take(0).unwrap();
    assert_eq!(row.map(|r| r.count).unwrap_or(0), 1);
}

#[tokio::test]
async fn gallery_delete_returns_row_for_file_cleanup() {
    let db = test_db().await;
    let gallery = GalleryImageRepository::new(db);

    let image = gallery
        .create(GalleryImageCreate {
            image_url: "/images/abc123.jpg".to_string(),
        })
        .await
        .unwrap();

    let deleted = gallery.delete(&key_of(&image.id)).await.unwrap();
    assert_eq!(deleted.image_url, "/images/abc123.jpg");

    let err = gallery.delete(&key_of(&image.id)).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn reviews_are_listed_newest_first() {
    let db = test_db().await;
    let reviews = ReviewRepository::new(db);

    for (name, rating) in [("Asha", 5), ("Ravi", 4)] {
        reviews
            .create(ReviewCreate {
                customer_name: name.to_string(),
                rating,
                comment: None,
            })
            .await
            .unwrap();
    }

    let all = reviews.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].created_at >= all[1].created_at);
}
