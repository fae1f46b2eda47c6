pub mod orders;

use log::*;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::traits::OrderStoreError;

pub fn db_url() -> String {
    std::env::var("TKG_DATABASE_URL").unwrap_or_else(|_| {
        warn!("🗃️ TKG_DATABASE_URL is not set. Using the default database URL");
        "sqlite://data/tikiti_store.db".to_string()
    })
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, OrderStoreError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    debug!("🗃️ Connected to database {url} with a pool of {max_connections} connections");
    Ok(pool)
}
