//! OAuth2 client-credentials token manager
//!
//! Obtains bearer tokens from the FatSecret token endpoint and caches them
//! under a fixed key. A cached token is reused until 60 seconds before its
//! reported expiry, so one outbound grant request serves many API calls.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::cache::CacheManager;
use crate::config::FatSecretConfig;
use crate::error::FatSecretError;

/// FatSecret OAuth2 token endpoint
const TOKEN_URL: &str = "https://oauth.fatsecret.com/connect/token";

/// Fixed cache key for the bearer token
const TOKEN_CACHE_KEY: &str = "fatsecret_access_token";

/// Seconds subtracted from `expires_in` so a token is refreshed before the
/// upstream actually rejects it
const TOKEN_EXPIRY_MARGIN_SECS: u64 = 60;

/// A bearer token together with its (margin-adjusted) expiry time
///
/// Tokens are never mutated; a refresh stores a new value under the same
/// cache key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The bearer token value
    pub value: String,
    /// When the token stops being usable (already includes the safety margin)
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Returns true while the token can still be sent upstream
    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

/// Token response returned by the FatSecret token endpoint
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Obtains and caches OAuth2 bearer tokens for the FatSecret API
#[derive(Debug, Clone)]
pub struct TokenManager {
    /// HTTP client for the grant exchange
    http_client: Client,
    /// Client credentials
    config: FatSecretConfig,
    /// Cache manager holding the current token
    cache_manager: Option<CacheManager>,
    /// Token endpoint URL (overridable for testing)
    token_url: String,
}

impl TokenManager {
    /// Creates a new TokenManager with the default cache location
    pub fn new(config: FatSecretConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
            cache_manager: CacheManager::new(),
            token_url: TOKEN_URL.to_string(),
        }
    }

    /// Replaces the cache manager (`None` disables token caching)
    pub fn with_cache(mut self, cache_manager: Option<CacheManager>) -> Self {
        self.cache_manager = cache_manager;
        self
    }

    /// Points the manager at a different token endpoint (for testing)
    #[cfg(test)]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Returns a valid bearer token, performing the grant exchange on a
    /// cache miss or after expiry
    ///
    /// # Returns
    /// * `Ok(String)` - A token valid for at least the safety margin
    /// * `Err(FatSecretError)` - Configuration, transport, or upstream failure
    pub async fn get_access_token(&self) -> Result<String, FatSecretError> {
        if let Some(ref cache_manager) = self.cache_manager {
            if let Some(cached) = cache_manager.read::<AccessToken>(TOKEN_CACHE_KEY) {
                if !cached.is_expired && cached.data.is_valid() {
                    return Ok(cached.data.value);
                }
            }
        }

        let token = self.request_token().await?;

        if let Some(ref cache_manager) = self.cache_manager {
            let ttl = (token.expires_at - Utc::now()).num_seconds().max(0) as u64;
            let _ = cache_manager.write(TOKEN_CACHE_KEY, &token, ttl);
        }

        Ok(token.value)
    }

    /// Performs the client-credentials grant exchange
    async fn request_token(&self) -> Result<AccessToken, FatSecretError> {
        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", "basic")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FatSecretError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let token_response: TokenResponse = serde_json::from_str(&body)?;

        let usable_secs = token_response
            .expires_in
            .saturating_sub(TOKEN_EXPIRY_MARGIN_SECS);

        Ok(AccessToken {
            value: token_response.access_token,
            expires_at: Utc::now() + Duration::seconds(usable_secs as i64),
        })
    }
}
