//! Exposed operations for a transport layer to surface
//!
//! Each operation validates its required argument, runs the corresponding
//! pipeline, and wraps the result in a `{success, ..., message}` envelope.
//! Argument problems and internal failures are reported as distinct error
//! variants so a transport can map them to its own status codes.

use serde::Serialize;
use thiserror::Error;

use crate::auth::TokenManager;
use crate::cache::CacheManager;
use crate::config::FatSecretConfig;
use crate::data::{
    autocomplete, search, standardize, AutocompleteClient, DetailsClient, FoodSummary,
    NutritionFacts, RawFood, SearchClient, SOURCE_NAME,
};
use crate::lookup::NutritionLookup;

/// Errors surfaced to the transport layer
#[derive(Debug, Error)]
pub enum OpError {
    /// A required argument is missing or blank
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Any internal failure, with the original message for diagnostics
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Envelope for nutrition search results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNutritionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition_data: Option<NutritionFacts>,
    pub message: String,
    pub source: String,
}

/// Envelope for food detail lookups: the raw payload plus its normalized form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDetailsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_details: Option<RawFood>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition_data: Option<NutritionFacts>,
    pub message: String,
    pub source: String,
}

/// Envelope for autocomplete suggestions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub success: bool,
    pub suggestions: Vec<String>,
    pub message: String,
}

/// Bundles the FatSecret clients behind the exposed operations
#[derive(Debug, Clone)]
pub struct NutritionService {
    search_client: SearchClient,
    details_client: DetailsClient,
    autocomplete_client: AutocompleteClient,
    lookup: NutritionLookup,
}

impl NutritionService {
    /// Creates a service with the default cache location
    pub fn new(config: FatSecretConfig) -> Self {
        Self::with_cache(config, CacheManager::new())
    }

    /// Creates a service sharing one cache manager across all clients
    /// (`None` disables caching everywhere, including the token cache)
    pub fn with_cache(config: FatSecretConfig, cache_manager: Option<CacheManager>) -> Self {
        let token_manager = TokenManager::new(config).with_cache(cache_manager.clone());
        let search_client =
            SearchClient::new(token_manager.clone()).with_cache(cache_manager.clone());
        let details_client =
            DetailsClient::new(token_manager.clone()).with_cache(cache_manager.clone());
        let autocomplete_client =
            AutocompleteClient::new(token_manager).with_cache(cache_manager.clone());
        let lookup = NutritionLookup::new(search_client.clone(), details_client.clone())
            .with_cache(cache_manager);

        Self {
            search_client,
            details_client,
            autocomplete_client,
            lookup,
        }
    }

    /// Creates a service from pre-built clients (for testing)
    #[cfg(test)]
    pub fn with_clients(
        search_client: SearchClient,
        details_client: DetailsClient,
        autocomplete_client: AutocompleteClient,
        lookup: NutritionLookup,
    ) -> Self {
        Self {
            search_client,
            details_client,
            autocomplete_client,
            lookup,
        }
    }

    /// Looks up canonical nutrition facts for a food name
    ///
    /// `success: false` with a message means the lookup ran but found
    /// nothing (or degraded); only a blank argument is an error.
    pub async fn search_nutrition(
        &self,
        food_name: &str,
    ) -> Result<SearchNutritionResponse, OpError> {
        if food_name.trim().is_empty() {
            return Err(OpError::InvalidArgument("foodName is required".to_string()));
        }

        match self.lookup.fetch(food_name).await {
            Some(facts) => Ok(SearchNutritionResponse {
                success: true,
                message: format!("Nutrition data found for '{}'", food_name.trim()),
                nutrition_data: Some(facts),
                source: SOURCE_NAME.to_string(),
            }),
            None => Ok(SearchNutritionResponse {
                success: false,
                message: format!("No nutrition data found for '{}'", food_name.trim()),
                nutrition_data: None,
                source: SOURCE_NAME.to_string(),
            }),
        }
    }

    /// Fetches the raw detail payload for a food id, plus its normalized form
    pub async fn food_details(&self, food_id: &str) -> Result<FoodDetailsResponse, OpError> {
        if food_id.trim().is_empty() {
            return Err(OpError::InvalidArgument("foodId is required".to_string()));
        }

        let food = self
            .details_client
            .get_food_details(food_id)
            .await
            .map_err(|err| OpError::Internal(err.to_string()))?;
        let facts = standardize(&food);

        Ok(FoodDetailsResponse {
            success: true,
            message: format!("Food details retrieved for id {}", food_id.trim()),
            food_details: Some(food),
            nutrition_data: Some(facts),
            source: SOURCE_NAME.to_string(),
        })
    }

    /// Fetches autocomplete suggestions for a partial food name
    pub async fn suggestions(
        &self,
        query: &str,
        max_results: Option<u32>,
        region: Option<&str>,
    ) -> Result<SuggestionsResponse, OpError> {
        if query.trim().is_empty() {
            return Err(OpError::InvalidArgument("query is required".to_string()));
        }

        let suggestions = self
            .autocomplete_client
            .autocomplete(
                query,
                max_results.unwrap_or(autocomplete::DEFAULT_MAX_RESULTS),
                region,
            )
            .await;

        Ok(SuggestionsResponse {
            success: true,
            message: format!("{} suggestions found", suggestions.len()),
            suggestions,
        })
    }

    /// Searches foods and returns the raw summaries
    ///
    /// Not part of the transport surface; used by the CLI to let users pick
    /// a food id for the details operation.
    pub async fn search_foods(&self, query: &str, max_results: Option<u32>) -> Vec<FoodSummary> {
        self.search_client
            .search_foods(query, max_results.unwrap_or(search::DEFAULT_MAX_RESULTS))
            .await
    }
}
