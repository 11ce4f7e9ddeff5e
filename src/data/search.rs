//! Food search client for the FatSecret `foods.search` method
//!
//! Search is fail-open: any transport or upstream failure is logged and
//! reported as an empty result list, so a degraded FatSecret never takes the
//! caller down with it.

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use super::{api_post, FoodSummary, OneOrMany};
use crate::auth::TokenManager;
use crate::cache::CacheManager;
use crate::error::FatSecretError;

/// Default number of search results requested at call sites
pub const DEFAULT_MAX_RESULTS: u32 = 3;

/// Time-to-live for search cache entries (24 hours)
const CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Response envelope from `foods.search`
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    foods: Option<FoodsBlock>,
}

/// The `foods` block; `food` is an object for one hit, an array otherwise
#[derive(Debug, Deserialize)]
struct FoodsBlock {
    #[serde(default)]
    food: Option<OneOrMany<FoodSummary>>,
}

/// Client for searching foods by name
#[derive(Debug, Clone)]
pub struct SearchClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Token manager supplying bearer tokens
    token_manager: TokenManager,
    /// Cache manager for persisting responses
    cache_manager: Option<CacheManager>,
}

impl SearchClient {
    /// Creates a new SearchClient with the default cache location
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

    /// Generates a cache key for a search query
    ///
    /// Case and surrounding whitespace are normalized away so "Apple" and
    /// "apple " share one entry.
    fn cache_key(query: &str) -> String {
        format!("fatsecret_search_{}", query.trim().to_lowercase())
    }

    /// Searches foods by name
    ///
    /// # Arguments
    /// * `query` - Free-text food name
    /// * `max_results` - Maximum number of summaries to request
    ///
    /// # Behavior
    /// - Fresh cached results are returned without a request
    /// - On a miss, resolves a token and queries `foods.search`
    /// - Non-empty results are cached for 24 hours
    /// - Any failure degrades to an empty list (never an error)
    pub async fn search_foods(&self, query: &str, max_results: u32) -> Vec<FoodSummary> {
        let cache_key = Self::cache_key(query);

        if let Some(ref cache_manager) = self.cache_manager {
            if let Some(cached) = cache_manager.read::<Vec<FoodSummary>>(&cache_key) {
                if !cached.is_expired {
                    return cached.data;
                }
            }
        }

        match self.fetch_from_api(query, max_results).await {
            Ok(foods) => {
                if !foods.is_empty() {
                    if let Some(ref cache_manager) = self.cache_manager {
                        let _ = cache_manager.write(&cache_key, &foods, CACHE_TTL_SECS);
                    }
                }
                foods
            }
            Err(err) => {
                warn!("food search failed for {:?}: {}", query, err);
                Vec::new()
            }
        }
    }

    /// Fetches search results directly from the API
    async fn fetch_from_api(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<FoodSummary>, FatSecretError> {
        let access_token = self.token_manager.get_access_token().await?;
        let max_results = max_results.to_string();

        let params = [
            ("method", "foods.search"),
            ("search_expression", query.trim()),
            ("max_results", max_results.as_str()),
            ("format", "json"),
        ];

        let envelope: SearchEnvelope =
            api_post(&self.http_client, &access_token, &params).await?;
        Ok(parse_summaries(envelope))
    }
}

/// Normalizes the search envelope into a uniform list
///
/// Absent `foods`/`food` fields become an empty list; a single bare object
/// becomes a one-element list; an array is used as-is.
fn parse_summaries(envelope: SearchEnvelope) -> Vec<FoodSummary> {
    envelope
        .foods
        .and_then(|block| block.food)
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
}
