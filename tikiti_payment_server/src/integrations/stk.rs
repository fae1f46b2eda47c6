//! Adapter between the engine's push-gateway seam and the STK provider client.

use log::*;
use stk_tools::{data_objects::PushOrder, StkApi, StkApiError};
use tikiti_payment_engine::{
    db_types::{Order, ProviderRefs},
    traits::{PushGateway, PushGatewayError},
};

#[derive(Clone)]
pub struct StkPushGateway {
    api: StkApi,
}

impl StkPushGateway {
    pub fn new(api: StkApi) -> Self {
        Self { api }
    }
}

fn narration_for(order: &Order) -> String {
    format!("{} ticket(s) for {}", order.quantity, order.event_name)
}

impl PushGateway for StkPushGateway {
    async fn initiate_push(&self, order: &Order) -> Result<ProviderRefs, PushGatewayError> {
        let push = PushOrder {
            order_id: order.id.as_str().to_string(),
            amount: order.amount,
            phone: order.phone.clone(),
            narration: narration_for(order),
        };
        debug!("📲️ Sending STK push for order {}", order.id);
        let results = self.api.initiate_push(&push).await.map_err(|e| match e {
            StkApiError::AuthDeclined { .. } | StkApiError::NoTokenInResponse => {
                PushGatewayError::Auth(e.to_string())
            },
            StkApiError::PushDeclined { .. } => PushGatewayError::Declined(e.to_string()),
            _ => PushGatewayError::Unreachable(e.to_string()),
        })?;
        Ok(ProviderRefs { txn_id: results.txn_id, merchant_txn_id: results.merchant_txn_id })
    }
}
