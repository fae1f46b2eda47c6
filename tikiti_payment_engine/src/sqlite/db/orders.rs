use log::*;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderUpdate},
    traits::OrderStoreError,
};

/// Persist a new order. The id is minted here and the row starts in the schema default status, `Pending`.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, OrderStoreError> {
    let id = OrderId::random();
    let inserted = sqlx::query_as::<_, Order>(
        r#"INSERT INTO orders (id, full_name, email, phone, amount, quantity, event_id, event_name)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *"#,
    )
    .bind(id.as_str())
    .bind(&order.full_name)
    .bind(&order.email)
    .bind(&order.phone)
    .bind(order.amount)
    .bind(order.quantity)
    .bind(&order.event_id)
    .bind(&order.event_name)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Order {} inserted", inserted.id);
    Ok(inserted)
}

pub async fn fetch_order_by_id(id: &OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, OrderStoreError> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Secondary lookup on the provider's transaction id. Unique in practice since every push sends a fresh order id
/// as the transaction reference, but the query is capped at one row regardless.
pub async fn fetch_order_by_provider_txn_id(
    txn_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, OrderStoreError> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE provider_txn_id = $1 LIMIT 1")
        .bind(txn_id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Apply a sparse update as a single UPDATE statement. Returns the updated row, or None when the id does not exist.
pub async fn update_order(
    id: &OrderId,
    update: OrderUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, OrderStoreError> {
    if update.is_empty() {
        debug!("🗃️ Update for order {id} contains no changes");
        return Err(OrderStoreError::UpdateNoOp);
    }
    let mut builder = QueryBuilder::new("UPDATE orders SET ");
    let mut fields = builder.separated(", ");
    fields.push("updated_at = CURRENT_TIMESTAMP");
    if let Some(status) = update.new_status {
        fields.push("status = ").push_bind_unseparated(status.to_string());
    }
    if let Some(txn_id) = update.new_provider_txn_id {
        fields.push("provider_txn_id = ").push_bind_unseparated(txn_id);
    }
    if let Some(merchant_txn_id) = update.new_provider_merchant_txn_id {
        fields.push("provider_merchant_txn_id = ").push_bind_unseparated(merchant_txn_id);
    }
    if let Some(message) = update.new_error_message {
        fields.push("error_message = ").push_bind_unseparated(message);
    }
    if let Some(payload) = update.new_callback_payload {
        fields.push("callback_payload = ").push_bind_unseparated(payload);
    }
    if let Some(code) = update.new_callback_status_code {
        fields.push("callback_status_code = ").push_bind_unseparated(code);
    }
    if let Some(message) = update.new_callback_message {
        fields.push("callback_message = ").push_bind_unseparated(message);
    }
    builder.push(" WHERE id = ").push_bind(id.as_str()).push(" RETURNING *");
    let order = builder.build_query_as::<Order>().fetch_optional(conn).await?;
    Ok(order)
}
