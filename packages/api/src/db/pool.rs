//! Lazily opened connection pool.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::settings::settings;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Get or initialize the database connection pool.
pub async fn get_pool() -> Result<&'static PgPool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        let database = &settings().database;
        tracing::info!(max_connections = database.max_connections, "opening database pool");
        PgPoolOptions::new()
            .max_connections(database.max_connections)
            .connect(&database.url)
            .await
    })
    .await
}
