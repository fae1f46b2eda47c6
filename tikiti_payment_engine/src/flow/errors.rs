use thiserror::Error;

use crate::{
    db_types::{BookingValidationError, OrderId, OrderStatus},
    traits::{OrderStoreError, PushGatewayError},
};

#[derive(Debug, Error)]
pub enum OrderFlowError {
    #[error("Invalid booking. {0}")]
    ValidationError(#[from] BookingValidationError),
    #[error("Storage error. {0}")]
    StorageError(#[from] OrderStoreError),
    #[error("The push request was not accepted. {0}")]
    PushFailed(#[from] PushGatewayError),
    #[error("Could not interpret the callback payload. {0}")]
    MalformedCallback(String),
    #[error("No order matches the callback. {0}")]
    OrderNotFound(String),
    #[error("Order {0} is already in terminal state {1} and cannot be updated")]
    OrderAlreadyFinalized(OrderId, OrderStatus),
    #[error("Order {order_id} cannot move from {from} to {to}")]
    IllegalStatusChange { order_id: OrderId, from: OrderStatus, to: OrderStatus },
}
