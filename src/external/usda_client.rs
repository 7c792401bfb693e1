// ABOUTME: USDA FoodData Central client used as a live nutrition estimator on cache misses
// ABOUTME: Implements food search, detail retrieval, response caching and rate limiting
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! USDA `FoodData` Central API Client
//!
//! Provides a [`NutritionEstimator`] backed by the USDA `FoodData` Central API.
//! The raw user text is used as a search query; the best match is fetched in
//! detail and its energy, protein, carbohydrate and fat values (per 100 g)
//! become the estimate.
//!
//! # Features
//! - Food search and detailed food retrieval
//! - 24-hour response caching to minimize API calls
//! - Rate limiting (30 requests per minute by default)
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>
//!
//! # Example
//! ```rust,no_run
//! use macro_ledger::external::usda_client::{UsdaClient, UsdaClientConfig};
//! use macro_ledger::nutrition::{ResolutionCache, Resolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = UsdaClientConfig {
//!     api_key: "your_api_key".to_owned(),
//!     ..UsdaClientConfig::default()
//! };
//!
//! let resolver = Resolver::new(ResolutionCache::builtin()?, UsdaClient::new(config)?);
//! let estimate = resolver.resolve("Dragon fruit").await?;
//! # Ok(())
//! # }
//! ```

use crate::constants::{resolution::USDA_SOURCE_LABEL, service_names::USDA_API, usda};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{NutritionEstimate, NutritionFact};
use crate::nutrition::estimator::NutritionEstimator;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// USDA API client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsdaClientConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL for USDA API (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
    /// Cache TTL in seconds (default: 86400 = 24 hours)
    pub cache_ttl_secs: u64,
    /// Rate limit per minute (default: 30)
    pub rate_limit_per_minute: u32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Confidence reported for a best-match estimate
    pub estimate_confidence: f64,
}

impl Default for UsdaClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: usda::DEFAULT_BASE_URL.to_owned(),
            cache_ttl_secs: usda::DEFAULT_CACHE_TTL_SECS,
            rate_limit_per_minute: usda::DEFAULT_RATE_LIMIT_PER_MINUTE,
            timeout_secs: usda::DEFAULT_TIMEOUT_SECS,
            estimate_confidence: usda::DEFAULT_ESTIMATE_CONFIDENCE,
        }
    }
}

/// USDA Food Search Result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResult {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Data type (e.g., "Survey (FNDDS)", "Foundation", "SR Legacy")
    pub data_type: String,
    /// Brand owner (for branded foods)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_owner: Option<String>,
}

/// USDA Food Nutrient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodNutrient {
    /// Nutrient ID
    pub nutrient_id: u32,
    /// Nutrient name (e.g., "Protein", "Energy")
    pub nutrient_name: String,
    /// Nutrient unit (e.g., "g", "kcal", "mg")
    pub unit_name: String,
    /// Amount per 100g
    pub amount: f64,
}

/// Detailed USDA Food Information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodDetails {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Data type
    pub data_type: String,
    /// List of nutrients with amounts
    pub food_nutrients: Vec<FoodNutrient>,
}

impl FoodDetails {
    /// Amount of a nutrient by USDA nutrient id
    #[must_use]
    pub fn nutrient_amount(&self, nutrient_id: u32) -> Option<f64> {
        self.food_nutrients
            .iter()
            .find(|n| n.nutrient_id == nutrient_id)
            .map(|n| n.amount)
    }
}

/// Convert USDA details into a per-100 g estimate
///
/// # Errors
///
/// Returns `ExternalServiceError` if the food carries no energy value
pub fn estimate_from_details(
    details: &FoodDetails,
    confidence: f64,
) -> AppResult<NutritionEstimate> {
    let calories = details
        .nutrient_amount(usda::NUTRIENT_ENERGY_KCAL)
        .ok_or_else(|| {
            AppError::external_service(
                USDA_API,
                format!("Food {} has no energy value", details.fdc_id),
            )
            .with_resource_id(details.fdc_id.to_string())
        })?;
    let grams = |id| details.nutrient_amount(id).unwrap_or(0.0).max(0.0);

    let fact = NutritionFact {
        calories: calories.max(0.0),
        protein: grams(usda::NUTRIENT_PROTEIN),
        carbs: grams(usda::NUTRIENT_CARBS),
        fat: grams(usda::NUTRIENT_FAT),
        explanation: format!(
            "{} (100g). Based on USDA FoodData Central {} data.",
            details.description, details.data_type
        ),
    };

    Ok(NutritionEstimate::new(
        fact,
        confidence,
        vec![USDA_SOURCE_LABEL.to_owned()],
    ))
}

/// USDA API search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    foods: Vec<FoodSearchResult>,
}

/// USDA API food details response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodDetailsResponse {
    fdc_id: u64,
    description: String,
    data_type: String,
    food_nutrients: Vec<FoodNutrientResponse>,
}

#[derive(Debug, Deserialize)]
struct FoodNutrientResponse {
    nutrient: Option<NutrientInfo>,
    amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NutrientInfo {
    id: u32,
    name: String,
    unit_name: String,
}

impl From<FoodDetailsResponse> for FoodDetails {
    fn from(response: FoodDetailsResponse) -> Self {
        let food_nutrients = response
            .food_nutrients
            .into_iter()
            .filter_map(|n| {
                let nutrient = n.nutrient?;
                Some(FoodNutrient {
                    nutrient_id: nutrient.id,
                    nutrient_name: nutrient.name,
                    unit_name: nutrient.unit_name,
                    amount: n.amount.unwrap_or(0.0),
                })
            })
            .collect();

        Self {
            fdc_id: response.fdc_id,
            description: response.description,
            data_type: response.data_type,
            food_nutrients,
        }
    }
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T: Clone> CacheEntry<T> {
    fn fresh(&self) -> Option<T> {
        (Instant::now() < self.expires_at).then(|| self.data.clone())
    }
}

/// Drop entries whose TTL has passed
fn evict_expired<K, T>(cache: &mut HashMap<K, CacheEntry<T>>) {
    let now = Instant::now();
    cache.retain(|_, entry| now < entry.expires_at);
}

/// Rolling-window rate limiter for API requests
#[derive(Debug)]
struct RateLimiter {
    requests: Vec<Instant>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    const fn new(limit: u32, window: Duration) -> Self {
        Self {
            requests: Vec::new(),
            limit,
            window,
        }
    }

    /// Check if a request can be made, removing expired entries
    fn can_request(&mut self) -> bool {
        let now = Instant::now();
        self.requests.retain(|&t| now.duration_since(t) < self.window);
        self.requests.len() < self.limit as usize
    }

    fn record_request(&mut self) {
        self.requests.push(Instant::now());
    }

    async fn wait_if_needed(&mut self) {
        while !self.can_request() {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }
}

/// USDA `FoodData` Central API Client
pub struct UsdaClient {
    config: UsdaClientConfig,
    http_client: reqwest::Client,
    search_cache: Arc<RwLock<HashMap<String, CacheEntry<Vec<FoodSearchResult>>>>>,
    details_cache: Arc<RwLock<HashMap<u64, CacheEntry<FoodDetails>>>>,
    rate_limiter: Arc<RwLock<RateLimiter>>,
}

impl UsdaClient {
    /// Create a new USDA API client
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the HTTP client cannot be built
    pub fn new(config: UsdaClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build USDA HTTP client: {e}")))?;
        let rate_limiter = RateLimiter::new(config.rate_limit_per_minute, Duration::from_secs(60));

        Ok(Self {
            config,
            http_client,
            search_cache: Arc::new(RwLock::new(HashMap::new())),
            details_cache: Arc::new(RwLock::new(HashMap::new())),
            rate_limiter: Arc::new(RwLock::new(rate_limiter)),
        })
    }

    /// Search for foods by query string
    ///
    /// # Errors
    /// Returns error if the query or page size is invalid, or the API request fails
    pub async fn search_foods(
        &self,
        query: &str,
        page_size: u32,
    ) -> AppResult<Vec<FoodSearchResult>> {
        if query.trim().is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }

        if page_size == 0 || page_size > 200 {
            return Err(AppError::invalid_input(
                "Page size must be between 1 and 200",
            ));
        }

        let cache_key = format!("{query}:{page_size}");
        if let Some(hit) = self
            .search_cache
            .read()
            .await
            .get(&cache_key)
            .and_then(CacheEntry::fresh)
        {
            return Ok(hit);
        }

        self.throttle().await;

        let url = format!("{}/foods/search", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("query", query),
                ("pageSize", &page_size.to_string()),
                ("api_key", &self.config.api_key),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(USDA_API, e.to_string()))?;

        let response = Self::check_status(response).await?;
        let search_response: SearchResponse = response.json().await.map_err(|e| {
            AppError::external_service(USDA_API, format!("JSON parse error: {e}"))
        })?;

        let mut search_cache = self.search_cache.write().await;
        evict_expired(&mut search_cache);
        search_cache.insert(
            cache_key,
            CacheEntry {
                data: search_response.foods.clone(),
                expires_at: self.expiry(),
            },
        );
        drop(search_cache);

        Ok(search_response.foods)
    }

    /// Get detailed information for a specific food by FDC ID
    ///
    /// # Errors
    /// Returns error if the API request fails or the food does not exist
    pub async fn get_food_details(&self, fdc_id: u64) -> AppResult<FoodDetails> {
        if let Some(hit) = self
            .details_cache
            .read()
            .await
            .get(&fdc_id)
            .and_then(CacheEntry::fresh)
        {
            return Ok(hit);
        }

        self.throttle().await;

        let url = format!("{}/food/{fdc_id}", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", &self.config.api_key)])
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(USDA_API, e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("Food with FDC ID {fdc_id}")));
        }
        let response = Self::check_status(response).await?;

        let details_response: FoodDetailsResponse = response.json().await.map_err(|e| {
            AppError::external_service(USDA_API, format!("JSON parse error: {e}"))
        })?;
        let food_details = FoodDetails::from(details_response);

        let mut details_cache = self.details_cache.write().await;
        evict_expired(&mut details_cache);
        details_cache.insert(
            fdc_id,
            CacheEntry {
                data: food_details.clone(),
                expires_at: self.expiry(),
            },
        );
        drop(details_cache);

        Ok(food_details)
    }

    /// Number of cached (search, details) responses
    pub async fn cache_stats(&self) -> (usize, usize) {
        let search_count = self.search_cache.read().await.len();
        let details_count = self.details_cache.read().await.len();
        (search_count, details_count)
    }

    async fn throttle(&self) {
        let mut limiter = self.rate_limiter.write().await;
        limiter.wait_if_needed().await;
        limiter.record_request();
    }

    fn expiry(&self) -> Instant {
        Instant::now() + Duration::from_secs(self.config.cache_ttl_secs)
    }

    async fn check_status(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let code = match status {
            StatusCode::TOO_MANY_REQUESTS => ErrorCode::ExternalRateLimited,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorCode::ExternalAuthFailed,
            _ => ErrorCode::ExternalServiceError,
        };
        let body = response.text().await.unwrap_or_default();
        Err(AppError::new(code, format!("{USDA_API}: HTTP {status}: {body}"))
            .with_details(serde_json::json!({ "status": status.as_u16() })))
    }
}

#[async_trait]
impl NutritionEstimator for UsdaClient {
    fn name(&self) -> &'static str {
        "usda"
    }

    async fn estimate(&self, raw_text: &str) -> AppResult<NutritionEstimate> {
        let best = self
            .search_foods(raw_text.trim(), 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::not_found(format!("Food '{raw_text}'")).with_resource_id(raw_text)
            })?;

        debug!(
            fdc_id = best.fdc_id,
            description = %best.description,
            "USDA best match"
        );

        let details = self.get_food_details(best.fdc_id).await?;
        estimate_from_details(&details, self.config.estimate_confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nutrient(nutrient_id: u32, name: &str, unit: &str, amount: f64) -> FoodNutrient {
        FoodNutrient {
            nutrient_id,
            nutrient_name: name.to_owned(),
            unit_name: unit.to_owned(),
            amount,
        }
    }

    fn chicken_details() -> FoodDetails {
        FoodDetails {
            fdc_id: 171_477,
            description: "Chicken, breast, meat only, cooked, roasted".to_owned(),
            data_type: "SR Legacy".to_owned(),
            food_nutrients: vec![
                nutrient(1003, "Protein", "g", 31.02),
                nutrient(1004, "Total lipid (fat)", "g", 3.57),
                nutrient(1005, "Carbohydrate, by difference", "g", 0.0),
                nutrient(1008, "Energy", "kcal", 165.0),
            ],
        }
    }

    #[test]
    fn test_estimate_from_details() {
        let estimate = estimate_from_details(&chicken_details(), 0.7).unwrap();
        assert!((estimate.calories() - 165.0).abs() < f64::EPSILON);
        assert!((estimate.protein() - 31.02).abs() < f64::EPSILON);
        assert!((estimate.fat() - 3.57).abs() < f64::EPSILON);
        assert!(estimate.carbs().abs() < f64::EPSILON);
        assert!((estimate.confidence - 0.7).abs() < f64::EPSILON);
        assert_eq!(estimate.sources, vec!["USDA FoodData Central"]);
        assert!(estimate.fact.explanation.starts_with("Chicken, breast"));
    }

    #[test]
    fn test_estimate_requires_energy() {
        let mut details = chicken_details();
        details.food_nutrients.retain(|n| n.nutrient_id != 1008);
        let err = estimate_from_details(&details, 0.7).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        assert_eq!(err.context.resource_id.as_deref(), Some("171477"));
    }

    #[test]
    fn test_missing_macros_default_to_zero() {
        let mut details = chicken_details();
        details.food_nutrients.retain(|n| n.nutrient_id == 1008);
        let estimate = estimate_from_details(&details, 0.7).unwrap();
        assert!(estimate.protein().abs() < f64::EPSILON);
        assert!(estimate.fat().abs() < f64::EPSILON);
    }

    #[test]
    fn test_details_response_conversion() {
        let json = serde_json::json!({
            "fdcId": 171_688,
            "description": "Apples, raw, with skin",
            "dataType": "SR Legacy",
            "foodNutrients": [
                {
                    "nutrient": { "id": 1008, "name": "Energy", "unitName": "kcal" },
                    "amount": 52.0
                },
                {
                    "nutrient": {
                        "id": 1005,
                        "name": "Carbohydrate, by difference",
                        "unitName": "g"
                    },
                    "amount": 13.81
                },
                { "amount": 1.0 }
            ]
        });
        let response: FoodDetailsResponse = serde_json::from_value(json).unwrap();
        let details = FoodDetails::from(response);
        assert_eq!(details.fdc_id, 171_688);
        assert_eq!(details.food_nutrients.len(), 2);
        assert_eq!(details.nutrient_amount(1005), Some(13.81));
    }

    #[test]
    fn test_rate_limiter_window() {
        let mut limiter = RateLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.can_request());
        limiter.record_request();
        limiter.record_request();
        assert!(!limiter.can_request());
    }

    #[test]
    fn test_evict_expired_keeps_fresh_entries() {
        let now = Instant::now();
        let mut cache = HashMap::new();
        cache.insert(
            1_u64,
            CacheEntry {
                data: "stale",
                expires_at: now.checked_sub(Duration::from_secs(1)).unwrap(),
            },
        );
        cache.insert(
            2_u64,
            CacheEntry {
                data: "fresh",
                expires_at: now + Duration::from_secs(3600),
            },
        );

        evict_expired(&mut cache);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&2).and_then(CacheEntry::fresh), Some("fresh"));
    }

    #[tokio::test]
    async fn test_search_rejects_empty_query() {
        let client = UsdaClient::new(UsdaClientConfig::default()).unwrap();
        let err = client.search_foods("   ", 10).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let err = client.search_foods("apple", 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(client.cache_stats().await, (0, 0));
    }

    #[tokio::test]
    async fn test_estimate_rejects_blank_text_without_network() {
        let client = UsdaClient::new(UsdaClientConfig::default()).unwrap();
        let err = client.estimate("  ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
