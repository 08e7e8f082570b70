//! Database Models
//!
//! One file per entity, each with its `Create`/`Update` payload structs.
//! Record ids serialize as "table:id" strings via [`serde_helpers`].

pub mod serde_helpers;

pub mod admin_user;
pub mod category;
pub mod gallery_image;
pub mod menu_item;
pub mod review;
pub mod site_settings;

pub use admin_user::{AdminUser, AdminUserCreate};
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use gallery_image::{GalleryImage, GalleryImageCreate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuItemWithCategories};
pub use review::{Review, ReviewCreate};
pub use site_settings::{SiteSettings, SiteSettingsUpdate};
