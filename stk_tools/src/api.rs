use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};

use crate::{
    config::StkConfig,
    data_objects::{ProviderRefs, PushOrder, PushRequest, PushResponse},
    helpers::{normalize_msisdn, short_merchant_id},
    StkApiError,
    TokenCache,
};

/// Client for the provider's push endpoint. Cheap to clone; the underlying HTTP client and token cache are shared.
#[derive(Clone)]
pub struct StkApi {
    config: StkConfig,
    client: Arc<Client>,
    tokens: Arc<TokenCache>,
}

impl StkApi {
    pub fn new(config: StkConfig) -> Result<Self, StkApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client =
            Client::builder().default_headers(headers).build().map_err(|e| StkApiError::Initialization(e.to_string()))?;
        let tokens = Arc::new(TokenCache::new(config.clone(), client.clone()));
        Ok(Self { config, client: Arc::new(client), tokens })
    }

    /// Trigger an STK push prompt on the payer's device.
    ///
    /// The order id is bound as both the transaction id and transaction reference, so the provider's callback can
    /// always be correlated back to the order. The call is treated as successful only if the response reports a
    /// success status code or an explicit success flag; anything else is a decline carrying the raw response body.
    pub async fn initiate_push(&self, order: &PushOrder) -> Result<ProviderRefs, StkApiError> {
        let token = self.tokens.get_token().await?;
        let body = PushRequest {
            transaction_id: order.order_id.clone(),
            transaction_reference: order.order_id.clone(),
            amount: order.amount.value(),
            merchant_id: short_merchant_id(&self.config.merchant_id),
            transaction_type_id: self.config.transaction_type_id.clone(),
            payer_account: normalize_msisdn(&order.phone),
            narration: order.narration.clone(),
            callback_url: self.config.callback_url.clone(),
            pty_id: self.config.pty_id.clone(),
        };
        trace!("📲️ Sending push request for order {}", order.order_id);
        let response = self
            .client
            .post(self.config.push_url())
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StkApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let raw = response.text().await.map_err(|e| StkApiError::Transport(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(StkApiError::PushDeclined { status, body: raw });
        }
        let push = serde_json::from_str::<PushResponse>(&raw).map_err(|e| StkApiError::JsonError(e.to_string()))?;
        if !push.is_success() {
            debug!("📲️ Provider declined the push for order {}: {raw}", order.order_id);
            return Err(StkApiError::PushDeclined { status, body: raw });
        }
        let refs = push
            .results
            .map(|r| ProviderRefs { txn_id: r.transaction_id, merchant_txn_id: r.merchant_txn_id })
            .unwrap_or_default();
        info!(
            "📲️ Push initiated for order {}. Provider txn: {}",
            order.order_id,
            refs.txn_id.as_deref().unwrap_or("<none>")
        );
        Ok(refs)
    }

    pub fn config(&self) -> &StkConfig {
        &self.config
    }
}
