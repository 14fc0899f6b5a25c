// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization
// PURPOSE: Connect to PostgreSQL and bring the catalog schema up to date

use crate::config::Config;
use crate::db::MIGRATOR;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Called once during application startup in main.rs.
/// The pool is verified with a trivial query and the embedded migrations
/// are applied before it is handed to the HTTP server.
pub async fn init_db_pool(config: &Config) -> anyhow::Result<PgPool> {
    log::info!(
        "Initializing database pool: {}",
        redact_password(&config.database_url)
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        // Connection idle timeout (5 minutes)
        .idle_timeout(Duration::from_secs(300))
        // Connection lifetime (30 minutes before recycle)
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database_url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    MIGRATOR.run(&pool).await?;
    log::info!("Database pool initialized, schema is up to date");

    Ok(pool)
}

/// Hide the password part of a connection URL for logging
fn redact_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };

    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
        None => url.to_string(),
    }
}
