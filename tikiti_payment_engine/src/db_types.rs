use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use tkg_common::KesAmount;

//--------------------------------------        OrderId        -------------------------------------------------------
/// The store-assigned order identifier. It is opaque, immutable, and doubles as the transaction reference sent to
/// the payment provider, which is why a fresh one is minted for every order.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    /// Mint a new random order id (16 hex characters).
    pub fn random() -> Self {
        Self(format!("{:016x}", rand::random::<u64>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//--------------------------------------      OrderStatus      -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatus {
    /// The order has been created but no push request has been sent yet.
    Pending,
    /// The push prompt has been sent to the payer's device; we are waiting for the provider callback.
    InitiatedStkPush,
    /// The provider reported a successful payment. Terminal.
    Paid,
    /// The push was declined, or the callback reported an unclassified failure. Terminal.
    Failed,
    /// The payer dismissed the prompt. Terminal.
    Cancelled,
    /// The payer's device could not be reached before the provider gave up. Terminal.
    TimedOut,
}

impl OrderStatus {
    /// Terminal states accept no further transition, except the duplicate-notification short-circuit.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Failed | OrderStatus::Cancelled | OrderStatus::TimedOut)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::InitiatedStkPush => write!(f, "InitiatedStkPush"),
            OrderStatus::Paid => write!(f, "Paid"),
            OrderStatus::Failed => write!(f, "Failed"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
            OrderStatus::TimedOut => write!(f, "TimedOut"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct ConversionError(String);

impl FromStr for OrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "InitiatedStkPush" => Ok(Self::InitiatedStkPush),
            "Paid" => Ok(Self::Paid),
            "Failed" => Ok(Self::Failed),
            "Cancelled" => Ok(Self::Cancelled),
            "TimedOut" => Ok(Self::TimedOut),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to Pending");
            OrderStatus::Pending
        })
    }
}

//--------------------------------------     ProviderRefs      -------------------------------------------------------
/// The provider-assigned references for an initiated push. Either may be absent; both are recorded as soon as they
/// are known so the callback resolver can fall back on them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRefs {
    pub txn_id: Option<String>,
    pub merchant_txn_id: Option<String>,
}

//--------------------------------------        Order          -------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub amount: KesAmount,
    pub quantity: i64,
    pub event_id: String,
    pub event_name: String,
    pub status: OrderStatus,
    pub provider_txn_id: Option<String>,
    pub provider_merchant_txn_id: Option<String>,
    pub error_message: Option<String>,
    pub callback_payload: Option<String>,
    pub callback_status_code: Option<i64>,
    pub callback_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       NewOrder        -------------------------------------------------------
#[derive(Debug, Clone, Error)]
#[error("Invalid booking: {0}")]
pub struct BookingValidationError(pub String);

/// The immutable booking facts captured at order creation. Everything else on [`Order`] is assigned by the store or
/// by the reconciliation flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub amount: KesAmount,
    pub quantity: i64,
    pub event_id: String,
    pub event_name: String,
}

impl NewOrder {
    /// Reject bookings with missing fields before anything touches the store.
    pub fn validate(&self) -> Result<(), BookingValidationError> {
        let missing = |field: &str| BookingValidationError(format!("{field} is required"));
        if self.full_name.trim().is_empty() {
            return Err(missing("fullName"));
        }
        if self.email.trim().is_empty() {
            return Err(missing("email"));
        }
        if self.phone.trim().is_empty() {
            return Err(missing("phone"));
        }
        if self.event_id.trim().is_empty() {
            return Err(missing("eventId"));
        }
        if self.event_name.trim().is_empty() {
            return Err(missing("eventName"));
        }
        if !self.amount.is_positive() {
            return Err(BookingValidationError("amount must be positive".to_string()));
        }
        if self.quantity <= 0 {
            return Err(BookingValidationError("quantity must be positive".to_string()));
        }
        Ok(())
    }
}

//--------------------------------------      OrderUpdate      -------------------------------------------------------
/// A sparse field update, applied by the store in a single atomic UPDATE. Only fields that are set are touched;
/// `updated_at` is always refreshed.
#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub new_status: Option<OrderStatus>,
    pub new_provider_txn_id: Option<String>,
    pub new_provider_merchant_txn_id: Option<String>,
    pub new_error_message: Option<String>,
    pub new_callback_payload: Option<String>,
    pub new_callback_status_code: Option<i64>,
    pub new_callback_message: Option<String>,
}

impl OrderUpdate {
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.new_status = Some(status);
        self
    }

    pub fn with_provider_refs(mut self, refs: &ProviderRefs) -> Self {
        self.new_provider_txn_id = refs.txn_id.clone();
        self.new_provider_merchant_txn_id = refs.merchant_txn_id.clone();
        self
    }

    pub fn with_error_message<S: Into<String>>(mut self, message: S) -> Self {
        self.new_error_message = Some(message.into());
        self
    }

    pub fn with_callback_audit(mut self, payload: &str, status_code: i64, message: &str) -> Self {
        self.new_callback_payload = Some(payload.to_string());
        self.new_callback_status_code = Some(status_code);
        self.new_callback_message = Some(message.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.new_status.is_none()
            && self.new_provider_txn_id.is_none()
            && self.new_provider_merchant_txn_id.is_none()
            && self.new_error_message.is_none()
            && self.new_callback_payload.is_none()
            && self.new_callback_status_code.is_none()
            && self.new_callback_message.is_none()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::InitiatedStkPush,
            OrderStatus::Paid,
            OrderStatus::Failed,
            OrderStatus::Cancelled,
            OrderStatus::TimedOut,
        ] {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("Sideways".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::InitiatedStkPush.is_terminal());
        assert!(OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::TimedOut.is_terminal());
    }

    #[test]
    fn booking_validation() {
        let booking = NewOrder {
            full_name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: "0712345678".to_string(),
            amount: 500.into(),
            quantity: 2,
            event_id: "e1".to_string(),
            event_name: "Gala".to_string(),
        };
        assert!(booking.validate().is_ok());
        let mut missing_email = booking.clone();
        missing_email.email = "  ".to_string();
        assert!(missing_email.validate().is_err());
        let mut free = booking.clone();
        free.amount = 0.into();
        assert!(free.validate().is_err());
        let mut none = booking;
        none.quantity = 0;
        assert!(none.validate().is_err());
    }

    #[test]
    fn random_order_ids_are_distinct() {
        assert_ne!(OrderId::random(), OrderId::random());
        assert_eq!(OrderId::random().as_str().len(), 16);
    }
}
