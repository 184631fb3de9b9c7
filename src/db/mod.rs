//! Database layer
//!
//! This module handles persistence of:
//! - Organizations
//! - Projects (owned by an organization)
//! - Todos (owned by a project and an organization)

pub mod organization_repository;
pub mod project_repository;
pub mod schema;
pub mod todo_repository;

pub use organization_repository::OrganizationRepository;
pub use project_repository::ProjectRepository;
pub use todo_repository::TodoRepository;

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::config::DatabaseConfig;

/// Database connection pool type
pub type DbPool = Pool<Sqlite>;

/// Initialize the database connection pool
///
/// Foreign keys are enforced on every connection; the schema itself is
/// prepared separately by [`schema::prepare`].
pub async fn init_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let connect_options = config
        .url
        .parse::<SqliteConnectOptions>()
        .context("Failed to parse database URL")?
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.connect_timeout_secs))
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Single-connection in-memory pool with the schema applied
#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let pool = init_pool(&config).await.unwrap();
    schema::up(&pool).await.unwrap();
    pool
}
