//! Site Settings API
//!
//! One settings row for the whole site. GET is public (the site header
//! renders hours and closure notices from it), PUT is admin-only and
//! returns the post-commit row.

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/settings", get(handler::get).put(handler::update))
}
