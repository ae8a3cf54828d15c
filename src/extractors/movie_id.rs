//! Extract the movie id from the `{id}` path segment.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Movie id from the path. A segment that is not a plain run of ASCII digits
/// fitting in `i64` is rejected as not found, the same as an unknown id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovieId(pub i64);

impl MovieId {
    pub fn parse(segment: &str) -> Result<Self, AppError> {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::NotFound(format!("movie {}", segment)));
        }
        segment
            .parse()
            .map(MovieId)
            .map_err(|_| AppError::NotFound(format!("movie {}", segment)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MovieId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(e.body_text()))?;
        MovieId::parse(&segment)
    }
}
