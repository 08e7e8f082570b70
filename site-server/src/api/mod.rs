//! API Route Modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - login, logout, session, register
//! - [`upload`] - bare image upload
//! - [`events`] - SSE sync stream
//! - [`stats`] - dashboard counts
//! - [`categories`] - category management
//! - [`menu_items`] - menu item management and special toggle
//! - [`specials`] - active specials read
//! - [`gallery`] - gallery upload and management
//! - [`reviews`] - customer reviews
//! - [`settings`] - site settings singleton
//! - [`images`] - stored image file serving

pub mod multipart;

pub mod auth;
pub mod events;
pub mod health;
pub mod stats;
pub mod upload;

// Data model APIs
pub mod categories;
pub mod gallery;
pub mod images;
pub mod menu_items;
pub mod reviews;
pub mod settings;
pub mod specials;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
