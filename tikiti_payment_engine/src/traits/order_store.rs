use thiserror::Error;

use crate::db_types::{NewOrder, Order, OrderId, OrderUpdate};

/// The document-store seam the reconciliation core consumes. Four operations are all the flow needs: create, fetch
/// by id, query by the secondary correlation key, and a sparse atomic update.
#[allow(async_fn_in_trait)]
pub trait OrderStore: Clone {
    /// Persist a new order with `Pending` status. The store assigns the id and timestamps.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderStoreError>;

    /// Fetch an order by its store-assigned id.
    async fn fetch_order_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderStoreError>;

    /// Fetch the single order whose stored `provider_txn_id` equals the given identifier.
    ///
    /// At most one order can carry a given provider transaction id, because every push request sends a freshly
    /// minted order id as the transaction reference. The query is limit-1 on that assumption.
    async fn fetch_order_by_provider_txn_id(&self, txn_id: &str) -> Result<Option<Order>, OrderStoreError>;

    /// Apply a sparse field update in a single atomic UPDATE, refreshing `updated_at`. Returns the updated order,
    /// or `None` if no order with the given id exists.
    async fn update_order(&self, id: &OrderId, update: OrderUpdate) -> Result<Option<Order>, OrderStoreError>;
}

#[derive(Debug, Clone, Error)]
pub enum OrderStoreError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
    #[error("The requested update would not change anything")]
    UpdateNoOp,
}

impl From<sqlx::Error> for OrderStoreError {
    fn from(e: sqlx::Error) -> Self {
        OrderStoreError::DatabaseError(e.to_string())
    }
}
