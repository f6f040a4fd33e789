//! Postgres pool setup

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool size when neither the config file nor `--max-connections` sets one.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connect with [`DEFAULT_MAX_CONNECTIONS`].
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect to the timetable database. Fails fast if the first connection
/// cannot be established.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "connecting to postgres");
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
