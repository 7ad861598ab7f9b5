// ABOUTME: Calorie lookup route handler
// ABOUTME: Accepts a dish name and servings, returns per-serving and total calories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

use crate::{
    calories::{CalorieLookupError, CalorieRequest, CalorieResult, CalorieService},
    errors::AppError,
    resources::ServerResources,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tracing::debug;

/// Calorie routes
pub struct CalorieRoutes;

impl CalorieRoutes {
    /// Create the `/api/auth/getCalories` route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/getCalories", post(Self::handle_get_calories))
            .with_state(resources.calories.clone())
    }

    async fn handle_get_calories(
        State(service): State<CalorieService>,
        body: Result<Json<CalorieRequest>, JsonRejection>,
    ) -> Result<Json<CalorieResult>, AppError> {
        // Malformed JSON and wrongly-typed fields are validation failures
        let Json(request) = body.map_err(|rejection| {
            debug!("Rejected calorie request body: {}", rejection.body_text());
            CalorieLookupError::InvalidRequest
        })?;

        Ok(Json(service.lookup(request).await?))
    }
}
