//! Menu Domain Logic
//!
//! Pure rules shared by the public and admin surfaces: the 24h special
//! lifecycle, menu filtering, and the offer price display rule.

pub mod filter;
pub mod offer;
pub mod special;

pub use filter::{filter_items, CategorySelection};
pub use offer::{price_display, PriceDisplay};
pub use special::{evaluate, SpecialStatus, SPECIAL_WINDOW_HOURS};
