//! Parsing and classification of provider STK callbacks.
//!
//! The provider's callback schema is loose. Identifiers sometimes arrive as JSON numbers, the human-readable
//! message moves between `message` and `data.description` depending on the outcome, and field names are not
//! stable across gateway versions. Everything here is therefore tolerant on read: we extract what we can and
//! let [`classify`] decide what the notification means.

use serde_json::Value;

use crate::{
    db_types::{Order, OrderStatus},
    flow::OrderFlowError,
};

/// A provider callback reduced to the fields the engine acts on. `raw` keeps the original body verbatim for the
/// audit trail.
#[derive(Debug, Clone)]
pub struct CallbackNotification {
    pub status_code: i64,
    pub message: String,
    pub merchant_ref: Option<String>,
    pub transaction_reference: Option<String>,
    pub provider_txn_id: Option<String>,
    pub raw: String,
}

/// Strings and numbers both occur in the wild for the same field, so accept either.
fn extract_id(value: &Value, key: &str) -> Option<String> {
    match value.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

impl CallbackNotification {
    pub fn from_json(raw: &str) -> Result<Self, OrderFlowError> {
        let body: Value =
            serde_json::from_str(raw).map_err(|e| OrderFlowError::MalformedCallback(format!("Invalid JSON. {e}")))?;
        let results = match body.get("results") {
            Some(v) if !v.is_null() => v,
            _ => return Err(OrderFlowError::MalformedCallback("Missing results object".to_string())),
        };
        let status_code = body.get("statusCode").and_then(Value::as_i64).unwrap_or_default();
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| body.pointer("/data/description").and_then(Value::as_str))
            .unwrap_or_default()
            .to_string();
        let merchant_ref = extract_id(results, "merchantTxnId");
        let transaction_reference = extract_id(results, "transactionReference");
        let provider_txn_id = extract_id(results, "transactionId");
        Ok(Self { status_code, message, merchant_ref, transaction_reference, provider_txn_id, raw: raw.to_string() })
    }

    /// The correlation strategies to try, most precise first.
    pub fn correlation_strategies(&self) -> Vec<CorrelationStrategy> {
        let mut strategies = Vec::with_capacity(2);
        if let Some(id) = self.merchant_ref.as_ref().or(self.transaction_reference.as_ref()) {
            strategies.push(CorrelationStrategy::OrderId(id.clone()));
        }
        if let Some(txn_id) = &self.provider_txn_id {
            strategies.push(CorrelationStrategy::ProviderTxnId(txn_id.clone()));
        }
        strategies
    }
}

/// How to find the order a callback refers to. `OrderId` uses the reference we handed to the provider at push
/// time; `ProviderTxnId` is the fallback lookup on the provider's own transaction id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrelationStrategy {
    OrderId(String),
    ProviderTxnId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackDisposition {
    /// The callback finalizes the order into the given terminal state.
    Terminal(OrderStatus),
    /// The provider re-sent a notification for a transaction it already reported. Not an error, not an update.
    Duplicate,
}

/// Map a callback's status code and message onto a disposition. Message matching is case-insensitive and
/// substring-based since the provider pads its messages with transaction details.
pub fn classify(status_code: i64, message: &str) -> CallbackDisposition {
    let msg = message.to_lowercase();
    if status_code == 200 && msg.contains("success") {
        return CallbackDisposition::Terminal(OrderStatus::Paid);
    }
    if msg.contains("request cancelled by user") {
        return CallbackDisposition::Terminal(OrderStatus::Cancelled);
    }
    if msg.contains("ds timeout user cannot be reached") {
        return CallbackDisposition::Terminal(OrderStatus::TimedOut);
    }
    if status_code == 400 && msg.contains("duplicate request") {
        return CallbackDisposition::Duplicate;
    }
    CallbackDisposition::Terminal(OrderStatus::Failed)
}

/// What `process_callback` did with the notification.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackOutcome {
    /// The order was moved into a terminal state.
    Finalized(Order),
    /// A duplicate notification arrived for an order that was already settled. The order is returned untouched.
    AlreadyProcessed(Order),
}
