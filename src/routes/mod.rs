//! Explicit route registration and full application assembly.

mod common;
mod movies;

pub use common::common_routes;
pub use movies::movie_routes;

use crate::settings::Settings;
use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Whole application: liveness routes, movie routes and request tracing.
/// The body limit is applied by the movie handlers once the id has resolved.
pub fn app(state: AppState, settings: &Settings) -> Router {
    let state = state.with_body_limit(settings.max_body_bytes);
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(movie_routes(state))
        .layer(TraceLayer::new_for_http())
}
