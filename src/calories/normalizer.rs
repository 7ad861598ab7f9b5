// ABOUTME: Calorie normalization from USDA food detail into per-serving and total figures
// ABOUTME: Applies label-first precedence, the per-100g fallback, and output-only rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! Calorie normalizer
//!
//! Precedence:
//! 1. a label calorie value is used as-is (it already describes one serving)
//! 2. otherwise energy kcal/100 g × serving grams / 100, with a missing energy
//!    row counting as 0 kcal and a missing (or zero) serving size as 100 g
//!
//! Rounding happens only when building the result. The total is computed from
//! the unrounded per-serving figure, so 247.5 kcal × 3 is 743, not 248 × 3.

use super::{CalorieQuery, CalorieResult};
use crate::constants::usda;
use crate::external::{CalorieBasis, FoodDetail};

/// Unrounded calories in one serving
#[must_use]
pub fn raw_calories_per_serving(basis: &CalorieBasis) -> f64 {
    match *basis {
        CalorieBasis::Label {
            calories_per_serving,
        } => calories_per_serving,
        CalorieBasis::PerHundredGrams {
            energy_kcal,
            serving_size_grams,
        } => {
            let kcal_per_100g = energy_kcal.unwrap_or(0.0);
            let grams = serving_size_grams
                .filter(|grams| *grams != 0.0)
                .unwrap_or(usda::DEFAULT_SERVING_GRAMS);
            // Keep this operation order; it decides where ties land
            (kcal_per_100g / 100.0) * grams
        }
    }
}

/// Round to the nearest integer, ties toward positive infinity
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    rounded as i64
}

/// Build the client-facing result for a query from its food detail
#[must_use]
pub fn normalize(detail: &FoodDetail, query: &CalorieQuery) -> CalorieResult {
    let per_serving = raw_calories_per_serving(&detail.basis);
    let total = per_serving * query.servings.get();

    CalorieResult {
        dish_name: query.dish_name.clone(),
        servings: query.servings,
        calories_per_serving: round_half_up(per_serving),
        total_calories: round_half_up(total),
        source: usda::SOURCE_LABEL.to_owned(),
    }
}
