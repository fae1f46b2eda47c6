use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tikiti_payment_engine::db_types::{NewOrder, Order};
use tkg_common::KesAmount;

/// The booking payload the ticketing frontend submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub amount: KesAmount,
    pub quantity: i64,
    pub event_id: String,
    pub event_name: String,
}

impl From<NewOrderRequest> for NewOrder {
    fn from(req: NewOrderRequest) -> Self {
        NewOrder {
            full_name: req.full_name,
            email: req.email,
            phone: req.phone,
            amount: req.amount,
            quantity: req.quantity,
            event_id: req.event_id,
            event_name: req.event_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    pub order_id: String,
    pub status: String,
    pub provider_txn_id: Option<String>,
    pub provider_merchant_txn_id: Option<String>,
}

impl From<&Order> for OrderCreatedResponse {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id.as_str().to_string(),
            status: order.status.to_string(),
            provider_txn_id: order.provider_txn_id.clone(),
            provider_merchant_txn_id: order.provider_merchant_txn_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}
