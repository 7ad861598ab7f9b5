// ABOUTME: Main library entry point for the Caloriq calorie lookup API
// ABOUTME: Exposes the calorie pipeline, USDA client, account store, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

#![deny(unsafe_code)]

//! # Caloriq Server
//!
//! An HTTP service that turns a dish name and a serving count into a calorie
//! estimate using USDA `FoodData` Central, plus a small account store for the
//! client application.
//!
//! ## Architecture
//!
//! - **Calories**: validation, upstream lookup, and normalization of calorie figures
//! - **External**: the USDA `FoodData` Central client behind the `FoodDataProvider` trait
//! - **Database**: `SQLite` user store
//! - **Routes**: axum handlers, one route group per domain
//! - **Config**: environment-driven configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use caloriq_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Caloriq configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Calorie request validation, lookup, and normalization
pub mod calories;

/// Configuration management
pub mod config;

/// Application constants and default values
pub mod constants;

/// `SQLite` account store
pub mod database;

/// Unified error handling
pub mod errors;

/// External API clients
pub mod external;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Account data models
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP route groups
pub mod routes;
