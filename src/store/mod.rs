//! Movie persistence: the `MovieStore` trait and its in-memory and PostgreSQL backends.

mod memory;
mod postgres;

pub use memory::InMemoryMovieStore;
pub use postgres::{ensure_database_exists, ensure_movies_table, PgMovieStore};

use crate::error::AppError;
use crate::model::{Movie, NewMovie};
use async_trait::async_trait;

/// CRUD over movie records. Item operations fail with `AppError::NotFound`
/// when no record has the given id.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Insert and return the record with its assigned id.
    async fn create(&self, movie: NewMovie) -> Result<Movie, AppError>;

    /// All records in insertion order.
    async fn list_all(&self) -> Result<Vec<Movie>, AppError>;

    async fn get(&self, id: i64) -> Result<Movie, AppError>;

    /// Replace title, genre and year; the id is kept.
    async fn update(&self, id: i64, movie: NewMovie) -> Result<Movie, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Reachability check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("movie {}", id))
}
