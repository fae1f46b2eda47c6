use thiserror::Error;

use crate::db_types::{Order, ProviderRefs};

/// The payment-client seam. Implementations trigger a push prompt on the payer's device and report the
/// provider-assigned references; the engine records the outcome on the order either way.
#[allow(async_fn_in_trait)]
pub trait PushGateway {
    async fn initiate_push(&self, order: &Order) -> Result<ProviderRefs, PushGatewayError>;
}

#[derive(Debug, Clone, Error)]
pub enum PushGatewayError {
    #[error("Could not authenticate with the payment provider. {0}")]
    Auth(String),
    #[error("The payment provider declined the push request. {0}")]
    Declined(String),
    #[error("The payment provider could not be reached. {0}")]
    Unreachable(String),
}
