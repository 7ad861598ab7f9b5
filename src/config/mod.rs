// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven configuration for HTTP, database, CORS, and the USDA client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! Configuration module for the Caloriq server
//!
//! All configuration is read from the process environment (with optional
//! `.env` support) and passed explicitly into the components that need it.

/// Environment and server configuration
pub mod environment;

pub use environment::{CorsConfig, DatabaseConfig, Environment, ServerConfig, UsdaApiConfig};
