//! Food detail client for the FatSecret `food.get.v2` method
//!
//! Unlike search, detail lookup is fail-closed: a failure here means a
//! specific food id could not be resolved, and the caller needs to know.

use reqwest::Client;
use serde::Deserialize;

use super::{api_post, RawFood};
use crate::auth::TokenManager;
use crate::cache::CacheManager;
use crate::error::FatSecretError;

/// Time-to-live for detail cache entries (7 days); detail payloads change
/// far less often than search rankings
const CACHE_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Response envelope from `food.get.v2`; a missing `food` payload is a
/// decode error
#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    food: RawFood,
}

/// Client for fetching full food detail payloads by id
#[derive(Debug, Clone)]
pub struct DetailsClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Token manager supplying bearer tokens
    token_manager: TokenManager,
    /// Cache manager for persisting responses
    cache_manager: Option<CacheManager>,
}

impl DetailsClient {
    /// Creates a new DetailsClient with the default cache location
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

    /// Generates a cache key for a food id
    fn cache_key(food_id: &str) -> String {
        format!("fatsecret_food_{}", food_id.trim())
    }

    /// Fetches the raw detail payload for a food id
    ///
    /// # Arguments
    /// * `food_id` - FatSecret food identifier (from a search result)
    ///
    /// # Returns
    /// * `Ok(RawFood)` - The raw payload, from cache or upstream
    /// * `Err(FatSecretError)` - Token, transport, or upstream failure
    pub async fn get_food_details(&self, food_id: &str) -> Result<RawFood, FatSecretError> {
        let cache_key = Self::cache_key(food_id);

        if let Some(ref cache_manager) = self.cache_manager {
            if let Some(cached) = cache_manager.read::<RawFood>(&cache_key) {
                if !cached.is_expired {
                    return Ok(cached.data);
                }
            }
        }

        let food = self.fetch_from_api(food_id).await?;

        if let Some(ref cache_manager) = self.cache_manager {
            let _ = cache_manager.write(&cache_key, &food, CACHE_TTL_SECS);
        }

        Ok(food)
    }

    /// Fetches the detail payload directly from the API
    async fn fetch_from_api(&self, food_id: &str) -> Result<RawFood, FatSecretError> {
        let access_token = self.token_manager.get_access_token().await?;

        let params = [
            ("method", "food.get.v2"),
            ("food_id", food_id),
            ("format", "json"),
        ];

        let envelope: DetailEnvelope =
            api_post(&self.http_client, &access_token, &params).await?;
        Ok(envelope.food)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FatSecretConfig;
    use crate::data::OneOrMany;
    use tempfile::TempDir;

    /// Abbreviated `food.get.v2` response with a list of servings
    const DETAIL_RESPONSE: &str = r#"{
        "food": {
            "food_id": "35718",
            "food_name": "Kale",
            "food_type": "Generic",
            "food_url": "https://www.fatsecret.com/calories-nutrition/usda/kale",
            "servings": {
                "serving": [
                    {
                        "serving_id": "58083",
                        "serving_description": "1 cup, chopped",
                        "calories": "33",
                        "protein": "2.87",
                        "fat": "0.61",
                        "carbohydrate": "5.88",
                        "fiber": "1.3",
                        "sodium": "29"
                    },
                    {
                        "serving_id": "58084",
                        "serving_description": "100 g",
                        "calories": "49",
                        "protein": "4.28",
                        "fat": "0.93",
                        "carbohydrate": "8.75"
                    }
                ]
            }
        }
    }"#;

    /// Detail response where the sole serving is a bare object
    const SINGLE_SERVING_RESPONSE: &str = r#"{
        "food": {
            "food_name": "Homemade Broth",
            "servings": {
                "serving": {
                    "serving_description": "1 bowl",
                    "calories": "86"
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_detail_with_serving_list() {
        let envelope: DetailEnvelope =
            serde_json::from_str(DETAIL_RESPONSE).expect("Failed to parse detail response");

        assert_eq!(envelope.food.food_name.as_deref(), Some("Kale"));

        let servings = envelope
            .food
            .servings
            .expect("Servings should be present")
            .serving
            .expect("Serving list should be present")
            .into_vec();
        assert_eq!(servings.len(), 2);
        assert_eq!(servings[0].serving_description.as_deref(), Some("1 cup, chopped"));
        assert_eq!(servings[1].calories.as_deref(), Some("49"));
    }

    #[test]
    fn test_parse_detail_with_single_serving_object() {
        let envelope: DetailEnvelope = serde_json::from_str(SINGLE_SERVING_RESPONSE)
            .expect("Failed to parse single-serving response");

        let serving = envelope
            .food
            .servings
            .expect("Servings should be present")
            .serving
            .expect("Serving should be present");
        assert!(matches!(serving, OneOrMany::One(_)));
        assert_eq!(serving.into_vec().len(), 1);
    }

    #[test]
    fn test_parse_response_without_food_is_an_error() {
        let result: Result<DetailEnvelope, _> = serde_json::from_str("{}");
        assert!(result.is_err(), "Missing food payload must not parse");
    }

    #[test]
    fn test_cache_key_trims_the_id() {
        assert_eq!(
            DetailsClient::cache_key(" 35718 "),
            DetailsClient::cache_key("35718")
        );
    }

    #[tokio::test]
    async fn test_fresh_cached_payload_skips_the_network() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());

        let envelope: DetailEnvelope =
            serde_json::from_str(DETAIL_RESPONSE).expect("Failed to parse detail response");
        cache
            .write("fatsecret_food_35718", &envelope.food, 3600)
            .expect("Seeding the detail cache should succeed");

        let config = FatSecretConfig::new("id", "secret").expect("Valid test credentials");
        let token_manager = TokenManager::new(config)
            .with_cache(None)
            .with_token_url("http://127.0.0.1:9/connect/token");
        let client = DetailsClient::new(token_manager).with_cache(Some(cache));

        let food = client
            .get_food_details("35718")
            .await
            .expect("Cached payload should be returned");
        assert_eq!(food.food_name.as_deref(), Some("Kale"));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let config = FatSecretConfig::new("id", "secret").expect("Valid test credentials");
        let token_manager = TokenManager::new(config)
            .with_cache(None)
            .with_token_url("http://127.0.0.1:9/connect/token");
        let client = DetailsClient::new(token_manager).with_cache(None);

        let result = client.get_food_details("35718").await;
        assert!(result.is_err(), "Detail lookup is fail-closed");
    }
}
