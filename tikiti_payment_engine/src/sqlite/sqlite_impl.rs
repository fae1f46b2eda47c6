use log::*;
use sqlx::SqlitePool;

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderUpdate},
    sqlite::db,
    traits::{OrderStore, OrderStoreError},
};

/// The sqlite-backed order store. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl std::fmt::Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteDatabase ({})", self.url)
    }
}

impl SqliteDatabase {
    /// Connect to the database at `TKG_DATABASE_URL` (or the default path).
    pub async fn new(max_connections: u32) -> Result<Self, OrderStoreError> {
        let url = db::db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, OrderStoreError> {
        let pool = db::new_pool(url, max_connections).await?;
        info!("🗃️ Order store opened at {url}");
        Ok(Self { url: url.to_string(), pool })
    }

    /// Bring the schema up to date. Safe to call on every startup.
    pub async fn run_migrations(&self) -> Result<(), OrderStoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await.map_err(|e| OrderStoreError::DatabaseError(e.to_string()))?;
        debug!("🗃️ Database migrations are up to date");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl OrderStore for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        db::orders::insert_order(order, &mut conn).await
    }

    async fn fetch_order_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        db::orders::fetch_order_by_id(id, &mut conn).await
    }

    async fn fetch_order_by_provider_txn_id(&self, txn_id: &str) -> Result<Option<Order>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        db::orders::fetch_order_by_provider_txn_id(txn_id, &mut conn).await
    }

    async fn update_order(&self, id: &OrderId, update: OrderUpdate) -> Result<Option<Order>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        db::orders::update_order(id, update, &mut conn).await
    }
}
