// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, usda};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Environment type for logging and other deployment-dependent behavior
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// User store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL
    pub url: String,
}

/// USDA `FoodData` Central API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsdaApiConfig {
    /// API key; lookups fail without one
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL for USDA `FoodData` Central
    pub base_url: String,
    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl UsdaApiConfig {
    /// Per-request timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether a non-empty API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

impl Default for UsdaApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: usda::BASE_URL.to_owned(),
            timeout_secs: usda::TIMEOUT_SECS,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// User store configuration
    pub database: DatabaseConfig,
    /// Upstream nutrition provider configuration
    pub usda: UsdaApiConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Maximum accepted request body in bytes
    pub max_request_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_owned(),
            http_port: defaults::HTTP_PORT,
            environment: Environment::Development,
            database: DatabaseConfig {
                url: defaults::DATABASE_URL.to_owned(),
            },
            usda: UsdaApiConfig::default(),
            cors: CorsConfig {
                allowed_origins: defaults::CORS_ALLOWED_ORIGINS.to_owned(),
            },
            max_request_body_bytes: defaults::MAX_REQUEST_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed or a value is
    /// outside its accepted range
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self {
            host: env_var_or("HOST", defaults::HOST),
            http_port: parse_env_or("HTTP_PORT", defaults::HTTP_PORT)?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseConfig {
                url: env_var_or("DATABASE_URL", defaults::DATABASE_URL),
            },
            usda: UsdaApiConfig {
                api_key: env::var("USDA_API_KEY").ok().filter(|key| !key.is_empty()),
                base_url: env_var_or("USDA_API_BASE", usda::BASE_URL),
                timeout_secs: parse_env_or("USDA_TIMEOUT_SECS", usda::TIMEOUT_SECS)?,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", defaults::CORS_ALLOWED_ORIGINS),
            },
            max_request_body_bytes: parse_env_or(
                "MAX_REQUEST_BODY_BYTES",
                defaults::MAX_REQUEST_BODY_BYTES,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if self.usda.timeout_secs == 0 || self.usda.timeout_secs > usda::MAX_TIMEOUT_SECS {
            bail!(
                "USDA_TIMEOUT_SECS must be between 1 and {}, got {}",
                usda::MAX_TIMEOUT_SECS,
                self.usda.timeout_secs
            );
        }
        if self.usda.base_url.trim().is_empty() {
            bail!("USDA_API_BASE must not be empty");
        }
        if self.max_request_body_bytes == 0 {
            bail!("MAX_REQUEST_BODY_BYTES must be greater than zero");
        }
        Ok(())
    }

    /// bcrypt work factor for stored passwords
    ///
    /// Cost 4 is roughly 60x faster than the default 12 and is used for tests
    /// and debug builds only.
    #[must_use]
    pub fn bcrypt_cost(&self) -> u32 {
        if matches!(self.environment, Environment::Testing) || cfg!(debug_assertions) {
            4
        } else {
            bcrypt::DEFAULT_COST
        }
    }

    /// Address the HTTP listener binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Get a summary of the configuration for logging (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Caloriq Server Configuration:\n\
             - Bind Address: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - USDA API: {} (key {}, timeout {}s)\n\
             - CORS Origins: {}\n\
             - Max Body Bytes: {}",
            self.bind_address(),
            self.environment,
            self.database.url,
            self.usda.base_url,
            if self.usda.has_api_key() {
                "configured"
            } else {
                "missing"
            },
            self.usda.timeout_secs,
            self.cors.allowed_origins,
            self.max_request_body_bytes,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to a default when unset
fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
