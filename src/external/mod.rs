// ABOUTME: External API client modules (USDA FoodData Central)
// ABOUTME: Provides the nutrition data provider trait and its HTTP implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! External API Clients

pub mod usda_client;

pub use usda_client::{
    CalorieBasis, FoodDataProvider, FoodDetail, FoodSearchHit, UsdaClient, UsdaClientConfig,
};
