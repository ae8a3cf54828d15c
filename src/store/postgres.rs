//! PostgreSQL store: one `movies` table in a configurable schema.

use super::{not_found, MovieStore};
use crate::error::AppError;
use crate::model::{Movie, NewMovie};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const MOVIES_TABLE: &str = "movies";

/// Quote identifier for PostgreSQL (safe: only from settings).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Schema-qualified movies table, e.g. `"public"."movies"`.
fn qualified_table(schema: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(MOVIES_TABLE))
}

/// Create the schema and movies table if missing. Ids come from a sequence and are never reused.
pub async fn ensure_movies_table(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            genre TEXT NOT NULL,
            year TEXT NOT NULL
        )
        "#,
        qualified_table(schema)
    );
    sqlx::query(&ddl).execute(pool).await?;
    tracing::info!(schema = %schema, "movies table ready");
    Ok(())
}

/// Create the database named in `database_url` when it does not exist yet.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url.rfind('/').ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

pub struct PgMovieStore {
    pool: PgPool,
    table: String,
}

impl PgMovieStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgMovieStore {
            pool,
            table: qualified_table(schema),
        }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn create(&self, movie: NewMovie) -> Result<Movie, AppError> {
        let sql = format!(
            "INSERT INTO {} (title, genre, year) VALUES ($1, $2, $3) RETURNING id, title, genre, year",
            self.table
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Movie>(&sql)
            .bind(&movie.title)
            .bind(&movie.genre)
            .bind(&movie.year)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Movie>, AppError> {
        let sql = format!("SELECT id, title, genre, year FROM {} ORDER BY id", self.table);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Movie>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Movie, AppError> {
        let sql = format!("SELECT id, title, genre, year FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Movie>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn update(&self, id: i64, movie: NewMovie) -> Result<Movie, AppError> {
        let sql = format!(
            "UPDATE {} SET title = $1, genre = $2, year = $3 WHERE id = $4 RETURNING id, title, genre, year",
            self.table
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Movie>(&sql)
            .bind(&movie.title)
            .bind(&movie.genre)
            .bind(&movie.year)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
