// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Mutates process environment variables, so every test runs serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

#![allow(clippy::unwrap_used, clippy::expect_used)]

use caloriq_server::config::environment::{Environment, ServerConfig};
use caloriq_server::external::UsdaClientConfig;
use serial_test::serial;
use std::env;
use std::time::Duration;

const VARS: &[&str] = &[
    "HOST",
    "HTTP_PORT",
    "ENVIRONMENT",
    "DATABASE_URL",
    "USDA_API_KEY",
    "USDA_API_BASE",
    "USDA_TIMEOUT_SECS",
    "CORS_ALLOWED_ORIGINS",
    "MAX_REQUEST_BODY_BYTES",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_when_unset() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 5050);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.database.url, "sqlite:./data/caloriq.db");
    assert!(config.usda.api_key.is_none());
    assert_eq!(config.usda.timeout_secs, 10);
    assert_eq!(config.cors.allowed_origins, "*");
    assert_eq!(config.max_request_body_bytes, 65_536);
}

#[test]
#[serial]
fn test_values_are_read_from_environment() {
    clear_env();
    env::set_var("HTTP_PORT", "8081");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("USDA_API_KEY", "abc123");
    env::set_var("USDA_API_BASE", "http://localhost:9999/fdc/v1/");
    env::set_var("USDA_TIMEOUT_SECS", "3");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 8081);
    assert!(config.environment.is_production());
    assert!(config.usda.has_api_key());

    let client_config = UsdaClientConfig::from(&config.usda);
    assert_eq!(client_config.api_key, "abc123");
    assert_eq!(client_config.base_url, "http://localhost:9999/fdc/v1");
    assert_eq!(client_config.timeout, Duration::from_secs(3));
}

#[test]
#[serial]
fn test_empty_api_key_counts_as_missing() {
    clear_env();
    env::set_var("USDA_API_KEY", "");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(!config.usda.has_api_key());
    assert!(config.summary().contains("key missing"));
}

#[test]
#[serial]
fn test_invalid_numbers_are_rejected() {
    clear_env();
    env::set_var("HTTP_PORT", "not-a-port");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("USDA_TIMEOUT_SECS", "0");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("USDA_TIMEOUT_SECS", "120");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
}
