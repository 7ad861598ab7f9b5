// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and store-backed readiness endpoints for load balancers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! Health check routes for service monitoring
//!
//! `/health` never touches dependencies. `/ready` pings the user store and
//! answers 503 until it responds.

use crate::resources::ServerResources;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;
use tracing::warn;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .route("/ready", get(Self::ready_handler))
            .with_state(resources)
    }

    async fn health_handler() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn ready_handler(
        State(resources): State<Arc<ServerResources>>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        let (status, label) = match resources.database.ping().await {
            Ok(()) => (StatusCode::OK, "ready"),
            Err(e) => {
                warn!("Readiness check failed: {e:#}");
                (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
            }
        };

        (
            status,
            Json(serde_json::json!({
                "status": label,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        )
    }
}
