//! Core data models for the FatSecret nutrition adapter
//!
//! This module contains the canonical nutrition types the rest of the
//! application works with, the raw shapes FatSecret returns, and the shared
//! plumbing for calling the `server.api` endpoint.

pub mod autocomplete;
pub mod details;
pub mod normalize;
pub mod search;

pub use autocomplete::AutocompleteClient;
pub use details::DetailsClient;
pub use normalize::standardize;
pub use search::SearchClient;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::FatSecretError;

/// FatSecret Platform API endpoint; the `method` form parameter selects the
/// operation (`foods.search`, `food.get.v2`, `foods.autocomplete.v2`)
pub const API_URL: &str = "https://platform.fatsecret.com/rest/server.api";

/// Source label stamped on every canonical record and response envelope
pub const SOURCE_NAME: &str = "FatSecret";

/// Canonical nutrition record for one serving of a food
///
/// Numeric fields default to 0 when the upstream payload omits them or
/// carries a non-numeric value; `micro_nutrients` only contains keys that
/// were actually present in the source serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFacts {
    /// Display name of the food
    pub food_name: String,
    /// Where the record came from (always "FatSecret")
    pub source: String,
    /// Serving description, e.g. "1 cup, chopped" (default "100g")
    pub serving_size: String,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Fat in grams
    pub fat: f64,
    /// Carbohydrates in grams
    pub carbohydrates: f64,
    /// Optional nutrients (fiber, sugar, sodium, ...) present in the serving
    pub micro_nutrients: BTreeMap<String, f64>,
}

/// A single food summary from `foods.search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSummary {
    /// FatSecret food identifier (numeric, delivered as a string)
    pub food_id: String,
    /// Display name of the food
    pub food_name: String,
    /// One-line nutrition summary, e.g. "Per 100g - Calories: 52kcal ..."
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_description: Option<String>,
    /// Brand name for branded foods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// "Generic" or "Brand"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_type: Option<String>,
    /// Link to the food on fatsecret.com
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_url: Option<String>,
}

/// Raw food detail payload from `food.get.v2`
///
/// Kept close to the wire shape: the detail client caches this verbatim and
/// the normalizer converts it into [`NutritionFacts`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFood {
    #[serde(default)]
    pub food_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_url: Option<String>,
    #[serde(default)]
    pub servings: Option<Servings>,
}

/// The `servings` block of a food detail payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Servings {
    #[serde(default)]
    pub serving: Option<OneOrMany<Serving>>,
}

/// One serving sub-record; every nutrient arrives as a numeric string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Serving {
    #[serde(default)]
    pub serving_description: Option<String>,
    #[serde(default)]
    pub calories: Option<String>,
    #[serde(default)]
    pub protein: Option<String>,
    #[serde(default)]
    pub fat: Option<String>,
    #[serde(default)]
    pub carbohydrate: Option<String>,
    #[serde(default)]
    pub fiber: Option<String>,
    #[serde(default)]
    pub sugar: Option<String>,
    #[serde(default)]
    pub sodium: Option<String>,
    #[serde(default)]
    pub potassium: Option<String>,
    #[serde(default)]
    pub cholesterol: Option<String>,
    #[serde(default)]
    pub saturated_fat: Option<String>,
}

/// Repeated fields in FatSecret responses arrive as a bare object when there
/// is exactly one item and as an array otherwise
///
/// Deserializing through this enum normalizes both shapes at the API
/// boundary, so downstream code never branches on shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single bare item
    One(T),
    /// A list of items
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flattens either shape into a `Vec`
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// Issues a form-encoded POST to `server.api` and decodes the JSON body
///
/// FatSecret reports some failures as an `{"error": {...}}` body with a 200
/// status; those are surfaced as `Upstream` errors alongside real non-2xx
/// responses.
pub(crate) async fn api_post<T: DeserializeOwned>(
    http_client: &Client,
    access_token: &str,
    params: &[(&str, &str)],
) -> Result<T, FatSecretError> {
    let response = http_client
        .post(API_URL)
        .bearer_auth(access_token)
        .form(params)
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

    let value: serde_json::Value = serde_json::from_str(&body)?;
    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown API error")
            .to_string();
        return Err(FatSecretError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_value(value)?)
}
