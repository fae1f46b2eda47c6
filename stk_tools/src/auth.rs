use chrono::{DateTime, Duration, Utc};
use log::*;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config::StkConfig,
    data_objects::{AuthRequest, AuthResponse},
    StkApiError,
};

/// Safety margin subtracted from the provider-reported expiry, covering clock skew and in-flight latency.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;
/// Used when the provider omits `expires_in` from the auth response.
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Caches the bearer credential for the push-payment provider, refreshing it only when stale.
///
/// The cached slot sits behind a `tokio::sync::Mutex` which is held across the refresh await. Concurrent callers
/// that arrive while a refresh is in flight queue on the lock and find a fresh token when they acquire it, so there
/// is exactly one outbound auth call per expiry window.
pub struct TokenCache {
    config: StkConfig,
    client: Client,
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(config: StkConfig, client: Client) -> Self {
        Self { config, client, slot: Mutex::new(None) }
    }

    /// Return the cached bearer token, refreshing it against the provider's auth endpoint if missing or expired.
    /// A failed refresh does not clobber the cached credential.
    pub async fn get_token(&self) -> Result<String, StkApiError> {
        let mut slot = self.slot.lock().await;
        let now = Utc::now();
        if let Some(cached) = slot.as_ref() {
            if cached.is_fresh(now) {
                trace!("🔑️ Re-using cached provider token");
                return Ok(cached.token.clone());
            }
        }
        let fresh = self.refresh().await?;
        let token = fresh.token.clone();
        *slot = Some(fresh);
        Ok(token)
    }

    async fn refresh(&self) -> Result<CachedToken, StkApiError> {
        debug!("🔑️ Requesting a new bearer token from the provider");
        let body = AuthRequest {
            client_id: self.config.client_id.clone(),
            client_secret: self.config.client_secret.reveal().clone(),
            grant_type: self.config.grant_type.clone(),
            username: self.config.username.clone(),
            password: self.config.password.reveal().clone(),
        };
        let response = self
            .client
            .post(self.config.auth_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| StkApiError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| StkApiError::Transport(e.to_string()))?;
            return Err(StkApiError::AuthDeclined { status, message });
        }
        let auth = response.json::<AuthResponse>().await.map_err(|e| StkApiError::JsonError(e.to_string()))?;
        let token = auth.token.ok_or(StkApiError::NoTokenInResponse)?;
        let ttl = auth.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        let expires_at = expiry_from(Utc::now(), ttl);
        info!("🔑️ New provider token obtained. Valid until {expires_at}");
        Ok(CachedToken { token, expires_at })
    }
}

/// `expires_at = now + (reported expiry - 60s margin)`
fn expiry_from(now: DateTime<Utc>, expires_in_secs: i64) -> DateTime<Utc> {
    now + Duration::seconds(expires_in_secs - TOKEN_EXPIRY_MARGIN_SECS)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expiry_includes_safety_margin() {
        let now = Utc::now();
        assert_eq!(expiry_from(now, 3600), now + Duration::seconds(3540));
        // A pathologically short expiry goes stale immediately rather than lingering.
        assert!(expiry_from(now, 30) < now);
    }

    #[test]
    fn freshness_check() {
        let now = Utc::now();
        let cached = CachedToken { token: "t".into(), expires_at: now + Duration::seconds(1) };
        assert!(cached.is_fresh(now));
        assert!(!cached.is_fresh(now + Duration::seconds(2)));
    }
}
