// ABOUTME: Calorie resolution pipeline: request validation, upstream lookup, and normalization
// ABOUTME: Defines the request/result records and the domain error taxonomy for calorie lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! # Calorie Resolution
//!
//! A calorie lookup runs in three stages, each stateless:
//!
//! 1. [`validation`] turns the inbound [`CalorieRequest`] into a [`CalorieQuery`]
//! 2. [`service::CalorieService`] searches the food database and fetches the
//!    best match's nutrient detail
//! 3. [`normalizer`] derives per-serving and total calories from that detail
//!
//! Failures are reported as [`CalorieLookupError`], which maps one-to-one onto
//! the 400 / 404 / 500 responses of the HTTP surface.

pub mod normalizer;
pub mod service;
pub mod validation;

pub use normalizer::{normalize, raw_calories_per_serving, round_half_up};
pub use service::CalorieService;
pub use validation::validate;

use crate::constants::{messages, service_names::USDA_API};
use crate::errors::AppError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Largest integer an `f64` represents exactly (2^53)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Inbound calorie request as sent by clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalorieRequest {
    /// Free-text dish name
    #[serde(default)]
    pub dish_name: Option<String>,
    /// Number of servings; defaults to one when omitted
    #[serde(default)]
    pub servings: Option<f64>,
}

/// Positive, finite serving multiplier
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Servings(f64);

impl Servings {
    /// Wrap a serving count, rejecting zero, negative, and non-finite values
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    /// The raw multiplier
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Servings {
    fn default() -> Self {
        Self(1.0)
    }
}

// Whole counts go out as JSON integers (`2`, not `2.0`)
impl Serialize for Servings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0 <= MAX_EXACT_INTEGER {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Servings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::new(value)
            .ok_or_else(|| serde::de::Error::custom("servings must be a positive number"))
    }
}

/// Validated calorie query
#[derive(Debug, Clone, PartialEq)]
pub struct CalorieQuery {
    /// Trimmed, non-empty dish name
    pub dish_name: String,
    /// Serving multiplier
    pub servings: Servings,
}

/// Calorie estimate returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieResult {
    /// Dish name as queried
    pub dish_name: String,
    /// Serving multiplier as queried
    pub servings: Servings,
    /// Calories in one serving, rounded
    pub calories_per_serving: i64,
    /// Calories for all servings, rounded from the unrounded per-serving figure
    pub total_calories: i64,
    /// Data attribution
    pub source: String,
}

/// Calorie lookup failures
#[derive(Debug, Error)]
pub enum CalorieLookupError {
    /// Dish name missing/empty or servings not positive
    #[error("dish_name and valid servings required")]
    InvalidRequest,
    /// The food database returned no candidate for the dish
    #[error("Dish not found in USDA database")]
    DishNotFound,
    /// Search or detail call failed (transport, status, timeout, or body)
    #[error("upstream lookup failed: {0}")]
    UpstreamLookupFailure(#[source] AppError),
}

impl From<CalorieLookupError> for AppError {
    fn from(error: CalorieLookupError) -> Self {
        match error {
            CalorieLookupError::InvalidRequest => {
                Self::invalid_input(messages::INVALID_CALORIE_REQUEST)
            }
            CalorieLookupError::DishNotFound => Self::not_found(messages::DISH_NOT_FOUND),
            // Any upstream failure is a server error, whatever the provider coded it as
            CalorieLookupError::UpstreamLookupFailure(source) if source.http_status() >= 500 => {
                source
            }
            CalorieLookupError::UpstreamLookupFailure(source) => {
                Self::external_service(USDA_API, source.message.clone()).with_source(source)
            }
        }
    }
}
