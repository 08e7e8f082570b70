//! Menu Item API

mod handler;
pub(crate) mod view;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub use view::MenuItemView;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/special",
            post(handler::mark_special).delete(handler::unmark_special),
        )
}
