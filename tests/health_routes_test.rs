// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! Integration tests for health, readiness, and request id handling

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use caloriq_server::routes::build_router;
use common::{body_json, create_test_resources, FixtureProvider};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_reports_healthy() -> Result<()> {
    let resources = create_test_resources(Arc::new(FixtureProvider::label(0.0))).await?;
    let response = build_router(resources).oneshot(get("/health")).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_ready_pings_database() -> Result<()> {
    let resources = create_test_resources(Arc::new(FixtureProvider::label(0.0))).await?;
    let app = build_router(Arc::clone(&resources));

    let response = app.clone().oneshot(get("/ready")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?["status"], "ready");

    resources.database.pool().close().await;

    let response = app.oneshot(get("/ready")).await?;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await?["status"], "not_ready");
    Ok(())
}

#[tokio::test]
async fn test_generated_request_id_is_uuid() -> Result<()> {
    let resources = create_test_resources(Arc::new(FixtureProvider::label(0.0))).await?;
    let response = build_router(resources).oneshot(get("/health")).await?;

    let header = response.headers().get("x-request-id").unwrap().to_str()?;
    assert!(Uuid::parse_str(header).is_ok());
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_not_found() -> Result<()> {
    let resources = create_test_resources(Arc::new(FixtureProvider::label(0.0))).await?;
    let response = build_router(resources).oneshot(get("/api/nothing")).await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
