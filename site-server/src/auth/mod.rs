//! Authentication
//!
//! JWT token service and the axum middleware protecting the admin API.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
