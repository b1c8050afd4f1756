use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;

pub mod partner_repository;
pub mod sqlite_repo;
pub mod tour_repository;

pub use partner_repository::{PartnerRepository, PgPartnerRepository};
pub use sqlite_repo::{
    create_schema as create_sqlite_schema, SqlitePartnerRepository, SqliteTourRepository,
};
pub use tour_repository::{PgTourRepository, TourRepository};

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// SQLite pool for local development and tests. An in-memory database lives
/// and dies with its connection, so those pools hold exactly one, forever.
pub async fn create_sqlite_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(5));

    let options = if database_url.contains(":memory:") {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options.max_connections(5)
    };

    options.connect(database_url).await
}
