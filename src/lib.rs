//! Movies API: CRUD REST service for movie records over an injected store.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod settings;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use model::{FieldErrors, Movie, MovieInput, NewMovie};
pub use routes::{app, common_routes, movie_routes};
pub use settings::{Settings, StoreBackend};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_movies_table, InMemoryMovieStore, MovieStore, PgMovieStore};
