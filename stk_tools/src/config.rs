use log::*;
use tkg_common::Secret;

#[derive(Debug, Clone, Default)]
pub struct StkConfig {
    /// Base URL of the provider, e.g. "https://checkout.provider.co.ke"
    pub base_url: String,
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub grant_type: String,
    pub username: String,
    pub password: Secret<String>,
    /// The full merchant identifier issued by the provider. Push requests carry only its short form (last 3 chars).
    pub merchant_id: String,
    pub transaction_type_id: String,
    pub pty_id: String,
    /// The publicly reachable URL the provider posts transaction outcomes to.
    pub callback_url: String,
}

impl StkConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("TKG_STK_BASE_URL").unwrap_or_else(|_| {
            warn!("TKG_STK_BASE_URL not set, using (probably useless) default");
            "https://checkout.example.co.ke".to_string()
        });
        let client_id = std::env::var("TKG_STK_CLIENT_ID").unwrap_or_else(|_| {
            warn!("TKG_STK_CLIENT_ID not set, using (probably useless) default");
            "000000".to_string()
        });
        let client_secret = Secret::new(std::env::var("TKG_STK_CLIENT_SECRET").unwrap_or_else(|_| {
            warn!("TKG_STK_CLIENT_SECRET not set, using (probably useless) default");
            "00000000000000".to_string()
        }));
        let grant_type = std::env::var("TKG_STK_GRANT_TYPE").unwrap_or_else(|_| "password".to_string());
        let username = std::env::var("TKG_STK_USERNAME").unwrap_or_else(|_| {
            warn!("TKG_STK_USERNAME not set, using (probably useless) default");
            "merchant".to_string()
        });
        let password = Secret::new(std::env::var("TKG_STK_PASSWORD").unwrap_or_else(|_| {
            warn!("TKG_STK_PASSWORD not set, using (probably useless) default");
            "00000000000000".to_string()
        }));
        let merchant_id = std::env::var("TKG_STK_MERCHANT_ID").unwrap_or_else(|_| {
            warn!("TKG_STK_MERCHANT_ID not set, using (probably useless) default");
            "MER000".to_string()
        });
        let transaction_type_id = std::env::var("TKG_STK_TRANSACTION_TYPE_ID").unwrap_or_else(|_| "1".to_string());
        let pty_id = std::env::var("TKG_STK_PTY_ID").unwrap_or_else(|_| "1".to_string());
        let callback_url = std::env::var("TKG_STK_CALLBACK_URL").unwrap_or_else(|_| {
            warn!("TKG_STK_CALLBACK_URL not set. The provider will not be able to deliver payment outcomes.");
            "http://localhost:4700/stk/callback".to_string()
        });
        Self {
            base_url,
            client_id,
            client_secret,
            grant_type,
            username,
            password,
            merchant_id,
            transaction_type_id,
            pty_id,
            callback_url,
        }
    }

    pub fn auth_url(&self) -> String {
        format!("{}/api/auth", self.base_url)
    }

    pub fn push_url(&self) -> String {
        format!("{}/api/payments/stk-push", self.base_url)
    }
}
