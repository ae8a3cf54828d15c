//! Movies API server: reads settings from env, builds the configured store, serves the routes.

use movies_api::{
    app, ensure_database_exists, ensure_movies_table, AppState, InMemoryMovieStore, MovieStore, PgMovieStore, Settings,
    StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movies_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store: Arc<dyn MovieStore> = match &settings.store {
        StoreBackend::Memory => {
            tracing::info!("using in-memory store");
            Arc::new(InMemoryMovieStore::new())
        }
        StoreBackend::Postgres { database_url } => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(database_url)
                .await?;
            ensure_movies_table(&pool, &settings.schema).await?;
            tracing::info!(schema = %settings.schema, "using postgres store");
            Arc::new(PgMovieStore::new(pool, &settings.schema))
        }
    };

    let router = app(AppState::new(store), &settings);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
