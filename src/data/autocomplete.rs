//! Autocomplete client for the FatSecret `foods.autocomplete.v2` method
//!
//! Suggestions are cosmetic, so this client is fail-open like search: any
//! failure is logged and reported as an empty suggestion list.

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use super::{api_post, OneOrMany};
use crate::auth::TokenManager;
use crate::cache::CacheManager;
use crate::error::FatSecretError;

/// Default number of suggestions requested at call sites
pub const DEFAULT_MAX_RESULTS: u32 = 4;

/// Upstream cap on suggestion counts; larger requests are clamped
const MAX_RESULTS_LIMIT: u32 = 10;

/// Expressions shorter than this return no suggestions without a request
const MIN_EXPRESSION_CHARS: usize = 2;

/// Cache-key component used when no region is given
const DEFAULT_REGION_KEY: &str = "default";

/// Time-to-live for autocomplete cache entries (15 minutes); suggestions are
/// cheap to refetch and users iterate on them quickly
const CACHE_TTL_SECS: u64 = 15 * 60;

/// Response envelope from `foods.autocomplete.v2`
#[derive(Debug, Deserialize)]
struct SuggestionsEnvelope {
    #[serde(default)]
    suggestions: Option<SuggestionsBlock>,
}

/// The `suggestions` block; `suggestion` is a bare string for one hit
#[derive(Debug, Deserialize)]
struct SuggestionsBlock {
    #[serde(default)]
    suggestion: Option<OneOrMany<String>>,
}

/// Client for fetching typeahead suggestions for partial food names
#[derive(Debug, Clone)]
pub struct AutocompleteClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Token manager supplying bearer tokens
    token_manager: TokenManager,
    /// Cache manager for persisting responses
    cache_manager: Option<CacheManager>,
}

impl AutocompleteClient {
    /// Creates a new AutocompleteClient with the default cache location
    pub fn new(token_manager: TokenManager) -> Self {
        Self {
            http_client: Client::new(),
            token_manager,
            cache_manager: CacheManager::new(),
        }
    }

    /// Replaces the cache manager (`None` disables caching)
    pub fn with_cache(mut self, cache_manager: Option<CacheManager>) -> Self {
        self.cache_manager = cache_manager;
        self
    }

    /// Generates a cache key from the expression, result count, and region
    fn cache_key(expression: &str, max_results: u32, region: Option<&str>) -> String {
        format!(
            "fatsecret_autocomplete_{}_{}_{}",
            expression.to_lowercase(),
            max_results,
            region.unwrap_or(DEFAULT_REGION_KEY)
        )
    }

    /// Clamps a requested suggestion count to the upstream limit
    fn clamp_max_results(requested: u32) -> u32 {
        requested.min(MAX_RESULTS_LIMIT)
    }

    /// Fetches autocomplete suggestions for a partial food name
    ///
    /// # Arguments
    /// * `expression` - Partial food name the user has typed
    /// * `max_results` - Requested suggestion count (clamped to 10)
    /// * `region` - Optional FatSecret region code, e.g. "US"
    ///
    /// # Behavior
    /// - Trimmed expressions shorter than 2 characters return an empty list
    ///   immediately, with no cache lookup and no request
    /// - Fresh cached suggestions are returned without a request
    /// - Successful results are cached for 15 minutes
    /// - Any failure degrades to an empty list (never an error)
    pub async fn autocomplete(
        &self,
        expression: &str,
        max_results: u32,
        region: Option<&str>,
    ) -> Vec<String> {
        let expression = expression.trim();
        if expression.chars().count() < MIN_EXPRESSION_CHARS {
            return Vec::new();
        }

        let max_results = Self::clamp_max_results(max_results);
        let cache_key = Self::cache_key(expression, max_results, region);

        if let Some(ref cache_manager) = self.cache_manager {
            if let Some(cached) = cache_manager.read::<Vec<String>>(&cache_key) {
                if !cached.is_expired {
                    return cached.data;
                }
            }
        }

        match self.fetch_from_api(expression, max_results, region).await {
            Ok(suggestions) => {
                if let Some(ref cache_manager) = self.cache_manager {
                    let _ = cache_manager.write(&cache_key, &suggestions, CACHE_TTL_SECS);
                }
                suggestions
            }
            Err(err) => {
                warn!("autocomplete failed for {:?}: {}", expression, err);
                Vec::new()
            }
        }
    }

    /// Fetches suggestions directly from the API
    async fn fetch_from_api(
        &self,
        expression: &str,
        max_results: u32,
        region: Option<&str>,
    ) -> Result<Vec<String>, FatSecretError> {
        let access_token = self.token_manager.get_access_token().await?;
        let max_results = max_results.to_string();

        let mut params = vec![
            ("method", "foods.autocomplete.v2"),
            ("expression", expression),
            ("max_results", max_results.as_str()),
            ("format", "json"),
        ];
        if let Some(region) = region {
            params.push(("region", region));
        }

        let envelope: SuggestionsEnvelope =
            api_post(&self.http_client, &access_token, &params).await?;
        Ok(parse_suggestions(envelope))
    }
}

/// Normalizes the suggestions envelope into a uniform list
fn parse_suggestions(envelope: SuggestionsEnvelope) -> Vec<String> {
    envelope
        .suggestions
        .and_then(|block| block.suggestion)
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
}
