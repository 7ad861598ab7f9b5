// ABOUTME: Calorie lookup service chaining food search, detail retrieval, and normalization
// ABOUTME: Stateless per call; maps provider failures onto the calorie error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

use super::{normalize, validate, CalorieLookupError, CalorieQuery, CalorieRequest, CalorieResult};
use crate::errors::AppError;
use crate::external::{CalorieBasis, FoodDataProvider};
use std::sync::Arc;
use tracing::{info, warn};

/// Resolves dish names into calorie estimates through a food data provider
#[derive(Clone)]
pub struct CalorieService {
    provider: Arc<dyn FoodDataProvider>,
}

impl CalorieService {
    /// Create a service backed by `provider`
    #[must_use]
    pub fn new(provider: Arc<dyn FoodDataProvider>) -> Self {
        Self { provider }
    }

    /// Validate a raw request, then resolve it
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` before any upstream call when validation fails,
    /// otherwise the errors of [`resolve`](Self::resolve)
    pub async fn lookup(&self, request: CalorieRequest) -> Result<CalorieResult, CalorieLookupError> {
        let query = validate(request)?;
        self.resolve(&query).await
    }

    /// Search for the dish, fetch the best match's detail, and compute calories
    ///
    /// # Errors
    ///
    /// Returns `DishNotFound` when the search has no hit and
    /// `UpstreamLookupFailure` when either upstream call fails
    #[tracing::instrument(skip(self, query), fields(dish_name = %query.dish_name))]
    pub async fn resolve(&self, query: &CalorieQuery) -> Result<CalorieResult, CalorieLookupError> {
        let hit = self
            .provider
            .search_first(&query.dish_name)
            .await
            .map_err(upstream_failure)?
            .ok_or(CalorieLookupError::DishNotFound)?;

        let detail = self
            .provider
            .food_detail(hit.fdc_id)
            .await
            .map_err(upstream_failure)?;

        let result = normalize(&detail, query);

        if matches!(
            detail.basis,
            CalorieBasis::PerHundredGrams {
                energy_kcal: None,
                ..
            }
        ) {
            warn!(
                fdc_id = hit.fdc_id,
                food = %detail.description,
                "Food has neither a label calorie value nor an energy nutrient; reporting 0 kcal"
            );
        }

        info!(
            fdc_id = hit.fdc_id,
            food = %hit.description,
            servings = query.servings.get(),
            calories_per_serving = result.calories_per_serving,
            total_calories = result.total_calories,
            "Calorie lookup resolved"
        );

        Ok(result)
    }
}

fn upstream_failure(error: AppError) -> CalorieLookupError {
    warn!(error = %error, "USDA lookup failed");
    CalorieLookupError::UpstreamLookupFailure(error)
}
