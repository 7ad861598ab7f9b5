// ABOUTME: Application constants grouped by domain (service identity, defaults, USDA, messages)
// ABOUTME: Single home for literal values shared by config, routes, and the calorie pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! Constants module
//!
//! Constants are grouped into small domain modules rather than scattered
//! through the handlers that use them.

/// Service names
pub mod service_names {
    /// Caloriq server service name (also the tracing target prefix)
    pub const CALORIQ_SERVER: &str = "caloriq_server";
    /// Name of the upstream nutrition provider as used in error messages
    pub const USDA_API: &str = "USDA API";
}

/// Default values used when the environment does not override them
pub mod defaults {
    /// HTTP listen port
    pub const HTTP_PORT: u16 = 5050;
    /// Bind address
    pub const HOST: &str = "0.0.0.0";
    /// `SQLite` user store location
    pub const DATABASE_URL: &str = "sqlite:./data/caloriq.db";
    /// Allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
    /// Maximum accepted JSON body size in bytes
    pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
}

/// USDA `FoodData` Central contract values
pub mod usda {
    /// Production API base URL
    pub const BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Default per-call timeout in seconds
    pub const TIMEOUT_SECS: u64 = 10;
    /// Upper bound accepted for the per-call timeout
    pub const MAX_TIMEOUT_SECS: u64 = 60;
    /// Search results requested per lookup (best match only)
    pub const SEARCH_PAGE_SIZE: u32 = 1;
    /// Nutrient number for energy in kcal per 100 g
    pub const ENERGY_NUTRIENT_NUMBER: &str = "208";
    /// Serving size assumed when the food declares none
    pub const DEFAULT_SERVING_GRAMS: f64 = 100.0;
    /// Attribution label returned with every calorie result
    pub const SOURCE_LABEL: &str = "USDA FoodData Central";
}

/// Client-facing response messages
pub mod messages {
    /// Calorie request failed validation
    pub const INVALID_CALORIE_REQUEST: &str = "dish_name and valid servings required";
    /// Search returned no candidate
    pub const DISH_NOT_FOUND: &str = "Dish not found in USDA database";
    /// Generic body for every 5xx response
    pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
    /// Register request without credentials
    pub const CREDENTIALS_REQUIRED: &str = "email and password required";
}

/// Account constants
pub mod auth {
    /// Placeholder token returned on successful sign-in
    pub const PLACEHOLDER_TOKEN: &str = "dummy-token-or-jwt";
}
