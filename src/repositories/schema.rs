// src/repositories/schema.rs
use anyhow::{Context, Result};
use deadpool_postgres::Pool;
use log::info;

const INIT_SQL: &str = include_str!("../../migrations/001_init.sql");

/// Creates the tables and indexes if they are missing.
pub async fn apply(pool: &Pool) -> Result<()> {
    let client = pool.get().await.context("failed to get connection for schema setup")?;
    client
        .batch_execute(INIT_SQL)
        .await
        .context("failed to apply schema")?;
    info!("Database schema ready");
    Ok(())
}
