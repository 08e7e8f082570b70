//! Gallery API

mod handler;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::api::multipart::UPLOAD_BODY_LIMIT;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/gallery", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::upload))
        .route("/{id}", axum::routing::delete(handler::delete))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
