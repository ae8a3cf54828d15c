//! Movie CRUD handlers: list, create, read, update, delete.

use crate::error::AppError;
use crate::extractors::MovieId;
use crate::model::{FieldErrors, MovieInput};
use crate::response::{created, no_content, ok};
use crate::state::AppState;
use axum::{
    body::{Body, Bytes},
    extract::State,
    response::IntoResponse,
};
use serde_json::Value;

/// Buffer at most `limit` bytes of the body. Handlers call this only after the
/// id has resolved, so an unknown id wins over an oversized body.
async fn read_body(body: Body, limit: usize) -> Result<Bytes, AppError> {
    // Past the limit, or the client went away mid-body; either way nothing is stored.
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|_| AppError::PayloadTooLarge(limit))
}

/// Decode a request body into `MovieInput`. An empty body counts as an empty object.
fn parse_body(body: &Bytes) -> Result<MovieInput, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(MovieInput::default());
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("JSON parse error - {}", e)))?;
    match value {
        Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| AppError::BadRequest(e.to_string()))
        }
        _ => {
            let mut errors = FieldErrors::default();
            errors.add("non_field_errors", "Invalid data. Expected a dictionary.");
            Err(AppError::Validation(errors))
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let movies = state.store.list_all().await?;
    Ok(ok(movies))
}

pub async fn create(State(state): State<AppState>, body: Body) -> Result<impl IntoResponse, AppError> {
    let body = read_body(body, state.max_body_bytes).await?;
    let movie = parse_body(&body)?.validate().map_err(AppError::Validation)?;
    let movie = state.store.create(movie).await?;
    tracing::info!(id = movie.id, title = %movie.title, "movie created");
    Ok(created(movie))
}

pub async fn read(
    State(state): State<AppState>,
    MovieId(id): MovieId,
) -> Result<impl IntoResponse, AppError> {
    let movie = state.store.get(id).await?;
    Ok(ok(movie))
}

pub async fn update(
    State(state): State<AppState>,
    MovieId(id): MovieId,
    body: Body,
) -> Result<impl IntoResponse, AppError> {
    // Unknown id is reported before the body is read.
    state.store.get(id).await?;
    let body = read_body(body, state.max_body_bytes).await?;
    let movie = parse_body(&body)?.validate().map_err(AppError::Validation)?;
    let movie = state.store.update(id, movie).await?;
    tracing::info!(id, "movie updated");
    Ok(ok(movie))
}

pub async fn delete(
    State(state): State<AppState>,
    MovieId(id): MovieId,
) -> Result<impl IntoResponse, AppError> {
    state.store.delete(id).await?;
    tracing::info!(id, "movie deleted");
    Ok(no_content())
}
