// ABOUTME: Centralized resource container shared by all route handlers
// ABOUTME: Holds configuration, the account store, and the calorie lookup service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! # Server Resources
//!
//! Built once at startup and handed to every route group as `Arc<ServerResources>`.

use crate::calories::CalorieService;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::external::FoodDataProvider;
use std::sync::Arc;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Account store
    pub database: Database,
    /// Dish to calories pipeline
    pub calories: CalorieService,
}

impl ServerResources {
    /// Assemble resources from their already-initialized parts
    #[must_use]
    pub fn new(
        config: ServerConfig,
        database: Database,
        provider: Arc<dyn FoodDataProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            database,
            calories: CalorieService::new(provider),
        }
    }

    /// bcrypt work factor for new password hashes
    #[must_use]
    pub fn bcrypt_cost(&self) -> u32 {
        self.config.bcrypt_cost()
    }
}
