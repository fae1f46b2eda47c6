use tikiti_payment_engine::{
    db_types::{Order, ProviderRefs},
    traits::{PushGateway, PushGatewayError},
};

/// A push gateway that never talks to the network.
#[derive(Clone, Default)]
pub struct MockGateway {
    refs: ProviderRefs,
    error: Option<PushGatewayError>,
}

impl MockGateway {
    pub fn accepting(txn_id: &str) -> Self {
        Self { refs: ProviderRefs { txn_id: Some(txn_id.to_string()), merchant_txn_id: None }, error: None }
    }

    pub fn declining(reason: &str) -> Self {
        Self { refs: ProviderRefs::default(), error: Some(PushGatewayError::Declined(reason.to_string())) }
    }
}

impl PushGateway for MockGateway {
    async fn initiate_push(&self, order: &Order) -> Result<ProviderRefs, PushGatewayError> {
        match &self.error {
            Some(e) => Err(e.clone()),
            None => {
                let mut refs = self.refs.clone();
                refs.merchant_txn_id = Some(order.id.as_str().to_string());
                Ok(refs)
            },
        }
    }
}
