//! In-process store. Records live in insertion order; ids come from a counter that never goes back.

use super::{not_found, MovieStore};
use crate::error::AppError;
use crate::model::{Movie, NewMovie};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    movies: Vec<Movie>,
    last_id: i64,
}

#[derive(Default)]
pub struct InMemoryMovieStore {
    inner: RwLock<Inner>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.movies.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn create(&self, movie: NewMovie) -> Result<Movie, AppError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let movie = movie.into_movie(inner.last_id);
        inner.movies.push(movie.clone());
        Ok(movie)
    }

    async fn list_all(&self) -> Result<Vec<Movie>, AppError> {
        Ok(self.inner.read().await.movies.clone())
    }

    async fn get(&self, id: i64) -> Result<Movie, AppError> {
        self.inner
            .read()
            .await
            .movies
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn update(&self, id: i64, movie: NewMovie) -> Result<Movie, AppError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found(id))?;
        *slot = movie.into_movie(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let pos = inner
            .movies
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| not_found(id))?;
        inner.movies.remove(pos);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
