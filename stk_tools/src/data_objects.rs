use serde::{Deserialize, Serialize};
use tkg_common::KesAmount;

/// The credentials payload sent to the provider's auth endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
    pub username: String,
    pub password: String,
}

/// The provider's auth response. Some deployments return `token`, others `access_token`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "access_token")]
    pub token: Option<String>,
    pub expires_in: Option<i64>,
}

/// The details a caller must supply to trigger an STK push. The `order_id` doubles as the transaction id and
/// reference on the wire, which is the correlation anchor the provider echoes back in the callback.
#[derive(Debug, Clone)]
pub struct PushOrder {
    pub order_id: String,
    pub amount: KesAmount,
    pub phone: String,
    pub narration: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    pub transaction_id: String,
    pub transaction_reference: String,
    pub amount: i64,
    pub merchant_id: String,
    pub transaction_type_id: String,
    pub payer_account: String,
    pub narration: String,
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
    pub pty_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushResponse {
    pub status_code: Option<i64>,
    pub success: Option<bool>,
    pub message: Option<String>,
    pub results: Option<PushResults>,
}

impl PushResponse {
    /// The provider is inconsistent about how it reports success; some responses carry a status code, others only an
    /// explicit success flag. Anything else is a decline.
    pub fn is_success(&self) -> bool {
        self.status_code == Some(200) || self.success == Some(true)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushResults {
    pub transaction_id: Option<String>,
    pub merchant_txn_id: Option<String>,
}

/// The provider-assigned references extracted from a successful push response. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderRefs {
    pub txn_id: Option<String>,
    pub merchant_txn_id: Option<String>,
}
