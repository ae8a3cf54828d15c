//! Movie CRUD routes. Paths keep their trailing slash.

use crate::handlers::movies::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn movie_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/movies/", get(list).post(create))
        .route(
            "/api/movies/:id/",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
