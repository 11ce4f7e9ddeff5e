//! Nutrition lookup pipeline: search, detail fetch, normalization
//!
//! Composes the search and detail clients into a single "food name in,
//! canonical record out" operation with its own cache layer. The pipeline is
//! fail-open: any failure along the chain degrades to `None`.

use tracing::{debug, warn};

use crate::cache::CacheManager;
use crate::data::{search, standardize, DetailsClient, NutritionFacts, SearchClient};
use crate::error::FatSecretError;

/// Time-to-live for resolved nutrition records (24 hours)
const CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Resolves free-text food labels to canonical nutrition records
#[derive(Debug, Clone)]
pub struct NutritionLookup {
    /// Search client used to resolve labels to food ids
    search_client: SearchClient,
    /// Detail client used to fetch the matched food's payload
    details_client: DetailsClient,
    /// Cache manager for resolved records
    cache_manager: Option<CacheManager>,
}

impl NutritionLookup {
    /// Creates a new NutritionLookup with the default cache location
    pub fn new(search_client: SearchClient, details_client: DetailsClient) -> Self {
        Self {
            search_client,
            details_client,
            cache_manager: CacheManager::new(),
        }
    }

    /// Replaces the cache manager (`None` disables caching)
    pub fn with_cache(mut self, cache_manager: Option<CacheManager>) -> Self {
        self.cache_manager = cache_manager;
        self
    }

    /// Generates a cache key for a food label
    fn cache_key(food_label: &str) -> String {
        format!("fatsecret_nutrition_{}", food_label.trim().to_lowercase())
    }

    /// Looks up canonical nutrition facts for a food label
    ///
    /// # Arguments
    /// * `food_label` - Free-text food name, e.g. "kale" or "greek yogurt"
    ///
    /// # Behavior
    /// - Empty or whitespace-only labels return `None` immediately
    /// - Fresh cached records are returned without any request
    /// - Otherwise: search, take the first hit, fetch its detail payload,
    ///   normalize, cache for 24 hours
    /// - A miss (no search hits) or any error returns `None`; `None`
    ///   outcomes are never cached
    pub async fn fetch(&self, food_label: &str) -> Option<NutritionFacts> {
        if food_label.trim().is_empty() {
            return None;
        }

        let cache_key = Self::cache_key(food_label);

        if let Some(ref cache_manager) = self.cache_manager {
            if let Some(cached) = cache_manager.read::<NutritionFacts>(&cache_key) {
                if !cached.is_expired {
                    return Some(cached.data);
                }
            }
        }

        match self.fetch_uncached(food_label).await {
            Ok(Some(facts)) => {
                if let Some(ref cache_manager) = self.cache_manager {
                    let _ = cache_manager.write(&cache_key, &facts, CACHE_TTL_SECS);
                }
                Some(facts)
            }
            Ok(None) => {
                debug!("no search results for {:?}", food_label);
                None
            }
            Err(err) => {
                warn!("nutrition lookup failed for {:?}: {}", food_label, err);
                None
            }
        }
    }

    /// Runs the search → detail → normalize chain without the cache layer
    async fn fetch_uncached(
        &self,
        food_label: &str,
    ) -> Result<Option<NutritionFacts>, FatSecretError> {
        let matches = self
            .search_client
            .search_foods(food_label, search::DEFAULT_MAX_RESULTS)
            .await;

        let Some(first) = matches.first() else {
            return Ok(None);
        };

        let food = self.details_client.get_food_details(&first.food_id).await?;
        Ok(Some(standardize(&food)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenManager;
    use crate::config::FatSecretConfig;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn offline_lookup(cache: Option<CacheManager>) -> NutritionLookup {
        let config = FatSecretConfig::new("id", "secret").expect("Valid test credentials");
        let token_manager = TokenManager::new(config)
            .with_cache(None)
            .with_token_url("http://127.0.0.1:9/connect/token");
        let search_client = SearchClient::new(token_manager.clone()).with_cache(cache.clone());
        let details_client = DetailsClient::new(token_manager).with_cache(cache.clone());
        NutritionLookup::new(search_client, details_client).with_cache(cache)
    }

    fn sample_facts() -> NutritionFacts {
        NutritionFacts {
            food_name: "Kale".to_string(),
            source: "FatSecret".to_string(),
            serving_size: "1 cup, chopped".to_string(),
            calories: 33.0,
            protein: 2.87,
            fat: 0.61,
            carbohydrates: 5.88,
            micro_nutrients: BTreeMap::from([("fiber".to_string(), 1.3)]),
        }
    }

    #[tokio::test]
    async fn test_empty_label_returns_none_immediately() {
        let lookup = offline_lookup(None);

        assert!(lookup.fetch("").await.is_none());
        assert!(lookup.fetch("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_upstream_failure_degrades_to_none() {
        // Unroutable endpoints: the search layer swallows its error and the
        // lookup sees an empty result set
        let lookup = offline_lookup(None);

        assert!(lookup.fetch("kale").await.is_none());
    }

    #[tokio::test]
    async fn test_fresh_cached_record_skips_the_network() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());

        cache
            .write("fatsecret_nutrition_kale", &sample_facts(), 3600)
            .expect("Seeding the nutrition cache should succeed");

        let lookup = offline_lookup(Some(cache));

        let facts = lookup.fetch("Kale ").await.expect("Cached record expected");
        assert_eq!(facts, sample_facts());
    }

    #[tokio::test]
    async fn test_failed_lookup_writes_nothing_to_the_cache() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());
        let lookup = offline_lookup(Some(cache.clone()));

        assert!(lookup.fetch("kale").await.is_none());

        let cached: Option<crate::cache::CachedData<NutritionFacts>> =
            cache.read("fatsecret_nutrition_kale");
        assert!(cached.is_none(), "None outcomes must not be cached");
    }

    #[test]
    fn test_cache_key_is_case_and_whitespace_insensitive() {
        assert_eq!(
            NutritionLookup::cache_key("Greek Yogurt"),
            NutritionLookup::cache_key("greek yogurt  ")
        );
    }
}
