// ABOUTME: USDA FoodData Central API client for nutritional data retrieval
// ABOUTME: Implements best-match food search and detail retrieval behind the FoodDataProvider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! USDA `FoodData` Central API Client
//!
//! Two endpoints are used, always in sequence:
//! - `GET /foods/search?query=..&pageSize=1` to find the best-matching food
//! - `GET /food/{fdcId}` to fetch its nutrient detail
//!
//! The detail endpoint reports calories in one of two shapes depending on the
//! food's data type. Branded foods carry a `labelNutrients.calories.value`
//! figure that already describes one labelled serving; survey and legacy foods
//! only list nutrients per 100 g plus an optional `servingSize` in grams. The
//! client resolves that difference once, into [`CalorieBasis`], so nothing
//! downstream inspects optional fields.
//!
//! There is no caching, retry, or rate limiting here: every lookup is two
//! fresh calls, and the first failure is returned to the caller.
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use crate::config::UsdaApiConfig;
use crate::constants::{service_names::USDA_API, usda};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// USDA API client configuration
#[derive(Debug, Clone)]
pub struct UsdaClientConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL for USDA API (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
    /// Timeout applied to each upstream call
    pub timeout: Duration,
}

impl Default for UsdaClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: usda::BASE_URL.to_owned(),
            timeout: Duration::from_secs(usda::TIMEOUT_SECS),
        }
    }
}

impl From<&UsdaApiConfig> for UsdaClientConfig {
    fn from(config: &UsdaApiConfig) -> Self {
        Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            timeout: config.timeout(),
        }
    }
}

/// Best-matching search candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodSearchHit {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Data type (e.g., "Branded", "Survey (FNDDS)", "SR Legacy")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
}

/// How a food expresses its calorie content
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalorieBasis {
    /// Label value, already per one labelled serving
    Label {
        /// Calories in one serving
        calories_per_serving: f64,
    },
    /// Generic nutrient table, energy per 100 g
    PerHundredGrams {
        /// Amount of the energy nutrient (kcal per 100 g), if listed
        energy_kcal: Option<f64>,
        /// Declared serving size in grams, if any
        serving_size_grams: Option<f64>,
    },
}

/// Nutrient detail for one food, reduced to what calorie resolution needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDetail {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Calorie information in whichever shape the provider supplied
    pub basis: CalorieBasis,
}

/// Source of food search results and nutrient details
///
/// Lookups are a strict two-step pipeline: the identifier from
/// [`search_first`](Self::search_first) is the only input to
/// [`food_detail`](Self::food_detail).
#[async_trait]
pub trait FoodDataProvider: Send + Sync {
    /// Return the best match for `query`, or `None` when nothing matches
    ///
    /// # Errors
    /// Returns an error on transport, status, or decoding failures
    async fn search_first(&self, query: &str) -> AppResult<Option<FoodSearchHit>>;

    /// Fetch nutrient detail for a food found by search
    ///
    /// # Errors
    /// Returns an error on transport, status, or decoding failures
    async fn food_detail(&self, fdc_id: u64) -> AppResult<FoodDetail>;
}

/// USDA API search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Missing or null array means no hits, same as an empty one
    #[serde(default)]
    foods: Option<Vec<SearchFoodResponse>>,
}

#[derive(Debug, Deserialize)]
struct SearchFoodResponse {
    #[serde(rename = "fdcId")]
    fdc_id: u64,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "dataType", default)]
    data_type: Option<String>,
}

/// USDA API food details response
#[derive(Debug, Deserialize)]
struct FoodDetailsResponse {
    #[serde(rename = "fdcId", default)]
    fdc_id: Option<u64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "labelNutrients", default)]
    label_nutrients: Option<LabelNutrients>,
    #[serde(rename = "foodNutrients", default)]
    food_nutrients: Option<Vec<FoodNutrientResponse>>,
    #[serde(rename = "servingSize", default)]
    serving_size: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LabelNutrients {
    #[serde(default)]
    calories: Option<LabelValue>,
}

#[derive(Debug, Deserialize)]
struct LabelValue {
    #[serde(default)]
    value: Option<f64>,
}

/// One nutrient row; the full and abridged formats name fields differently
#[derive(Debug, Deserialize)]
struct FoodNutrientResponse {
    #[serde(rename = "nutrientNumber", default)]
    nutrient_number: Option<NutrientNumber>,
    #[serde(default)]
    number: Option<NutrientNumber>,
    #[serde(default)]
    nutrient: Option<NutrientInfo>,
    #[serde(default)]
    amount: Option<f64>,
    #[serde(default)]
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct NutrientInfo {
    #[serde(default)]
    number: Option<NutrientNumber>,
}

/// Nutrient numbers arrive as strings ("208") or, occasionally, numbers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NutrientNumber {
    Text(String),
    Numeric(f64),
}

impl NutrientNumber {
    fn matches(&self, code: &str) -> bool {
        match self {
            Self::Text(text) => text.trim() == code,
            Self::Numeric(n) => code.parse::<f64>().is_ok_and(|c| (c - n).abs() < f64::EPSILON),
        }
    }
}

impl FoodNutrientResponse {
    fn has_number(&self, code: &str) -> bool {
        self.nutrient_number
            .iter()
            .chain(self.number.iter())
            .chain(self.nutrient.iter().filter_map(|n| n.number.as_ref()))
            .any(|number| number.matches(code))
    }

    fn quantity(&self) -> Option<f64> {
        self.amount.or(self.value)
    }
}

impl FoodDetailsResponse {
    /// Resolve the response shape into a `FoodDetail`
    fn into_detail(self, requested_fdc_id: u64) -> FoodDetail {
        let label_calories = self
            .label_nutrients
            .and_then(|label| label.calories)
            .and_then(|calories| calories.value);

        let basis = label_calories.map_or_else(
            || CalorieBasis::PerHundredGrams {
                energy_kcal: self
                    .food_nutrients
                    .unwrap_or_default()
                    .iter()
                    .find(|n| n.has_number(usda::ENERGY_NUTRIENT_NUMBER))
                    .and_then(FoodNutrientResponse::quantity),
                serving_size_grams: self.serving_size,
            },
            |calories_per_serving| CalorieBasis::Label {
                calories_per_serving,
            },
        );

        FoodDetail {
            fdc_id: self.fdc_id.unwrap_or(requested_fdc_id),
            description: self.description.unwrap_or_default(),
            basis,
        }
    }
}

/// Map a transport-level `reqwest` failure into an `AppError`
fn map_transport_error(error: reqwest::Error) -> AppError {
    if error.is_timeout() || error.is_connect() {
        AppError::external_unavailable(USDA_API, error.to_string()).with_source(error)
    } else {
        AppError::external_service(USDA_API, error.to_string()).with_source(error)
    }
}

/// USDA `FoodData` Central API Client
#[derive(Debug, Clone)]
pub struct UsdaClient {
    config: UsdaClientConfig,
    http_client: reqwest::Client,
}

impl UsdaClient {
    /// Create a new USDA API client
    ///
    /// # Errors
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(config: UsdaClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                AppError::config(format!("Failed to build USDA HTTP client: {e}")).with_source(e)
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &UsdaClientConfig {
        &self.config
    }

    /// Issue an authenticated GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        if self.config.api_key.is_empty() {
            return Err(AppError::config_missing(
                "USDA API key not configured. Set USDA_API_KEY environment variable.",
            ));
        }

        let url = format!("{}{path}", self.config.base_url);
        debug!(usda.path = %path, "Calling USDA API");

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .query(&[("api_key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(usda.path = %path, http.status = %status, "USDA API returned an error status");
            return Err(AppError::external_service(
                USDA_API,
                format!("HTTP {status}: {body}"),
            ));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&body).map_err(|e| {
            AppError::external_service(USDA_API, format!("JSON parse error: {e}")).with_source(e)
        })
    }
}

#[async_trait]
impl FoodDataProvider for UsdaClient {
    async fn search_first(&self, query: &str) -> AppResult<Option<FoodSearchHit>> {
        if query.is_empty() {
            return Err(AppError::external_service(
                USDA_API,
                "Search query cannot be empty",
            ));
        }

        let page_size = usda::SEARCH_PAGE_SIZE.to_string();
        let search: SearchResponse = self
            .get_json(
                "/foods/search",
                &[("query", query), ("pageSize", page_size.as_str())],
            )
            .await?;

        Ok(search.foods.unwrap_or_default().into_iter().next().map(|food| FoodSearchHit {
            fdc_id: food.fdc_id,
            description: food.description.unwrap_or_default(),
            data_type: food.data_type,
        }))
    }

    async fn food_detail(&self, fdc_id: u64) -> AppResult<FoodDetail> {
        let details: FoodDetailsResponse = self.get_json(&format!("/food/{fdc_id}"), &[]).await?;
        Ok(details.into_detail(fdc_id))
    }
}
