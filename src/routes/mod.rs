// ABOUTME: Route module organization for Caloriq HTTP endpoints
// ABOUTME: Merges the route groups and applies the shared middleware stack
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! Route module for the Caloriq server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to service layers.

/// Account registration and sign-in routes
pub mod auth;
/// Calorie lookup route
pub mod calories;
/// Health check and readiness routes
pub mod health;

pub use auth::{AuthRoutes, AuthService, RegisterRequest, SignInRequest};
pub use calories::CalorieRoutes;
pub use health::HealthRoutes;

use crate::middleware::{request_id_middleware, setup_cors};
use crate::resources::ServerResources;
use axum::{extract::DefaultBodyLimit, middleware, Router};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

/// Build the full application router
///
/// Layer order, outermost first: request id and span, CORS, body limit.
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let body_limit = resources.config.max_request_body_bytes;
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(CalorieRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(resources))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware))
}
