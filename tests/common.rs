// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, fixture food providers, a mock USDA server, and router builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `caloriq_server`

use anyhow::Result;
use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use caloriq_server::{
    config::environment::{Environment, ServerConfig},
    database::Database,
    errors::{AppError, AppResult},
    external::{CalorieBasis, FoodDataProvider, FoodDetail, FoodSearchHit},
    resources::ServerResources,
    routes::build_router,
};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Once,
};
use tokio::task::JoinHandle;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// What the fixture returns from `food_detail`
#[derive(Clone)]
pub enum DetailFixture {
    Basis(CalorieBasis),
    Fail,
}

/// In-process food provider with canned answers and call counters
pub struct FixtureProvider {
    hit: Option<FoodSearchHit>,
    search_fails: bool,
    detail: DetailFixture,
    pub search_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl FixtureProvider {
    /// Search finds one food whose detail resolves to `basis`
    pub fn with_basis(basis: CalorieBasis) -> Self {
        Self {
            hit: Some(FoodSearchHit {
                fdc_id: 171_477,
                description: "Chicken, broilers or fryers, breast, meat only, cooked, roasted"
                    .to_owned(),
                data_type: Some("SR Legacy".to_owned()),
            }),
            search_fails: false,
            detail: DetailFixture::Basis(basis),
            search_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    /// Label value per serving
    pub fn label(calories: f64) -> Self {
        Self::with_basis(CalorieBasis::Label {
            calories_per_serving: calories,
        })
    }

    /// Energy per 100 g with an optional serving size
    pub fn per_hundred_grams(energy_kcal: Option<f64>, serving_size_grams: Option<f64>) -> Self {
        Self::with_basis(CalorieBasis::PerHundredGrams {
            energy_kcal,
            serving_size_grams,
        })
    }

    /// Search returns no foods
    pub fn no_hits() -> Self {
        Self {
            hit: None,
            ..Self::label(0.0)
        }
    }

    /// Search call fails
    pub fn failing_search() -> Self {
        Self {
            search_fails: true,
            ..Self::label(0.0)
        }
    }

    /// Search succeeds, detail call fails
    pub fn failing_detail() -> Self {
        Self {
            detail: DetailFixture::Fail,
            ..Self::label(0.0)
        }
    }

    pub fn total_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst) + self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FoodDataProvider for FixtureProvider {
    async fn search_first(&self, _query: &str) -> AppResult<Option<FoodSearchHit>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.search_fails {
            return Err(AppError::external_unavailable(
                "USDA API",
                "connection refused",
            ));
        }
        Ok(self.hit.clone())
    }

    async fn food_detail(&self, fdc_id: u64) -> AppResult<FoodDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        match &self.detail {
            DetailFixture::Basis(basis) => Ok(FoodDetail {
                fdc_id,
                description: "fixture food".to_owned(),
                basis: *basis,
            }),
            DetailFixture::Fail => Err(AppError::external_service(
                "USDA API",
                "HTTP 502 Bad Gateway: upstream exploded",
            )),
        }
    }
}

/// Server configuration suitable for tests
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.environment = Environment::Testing;
    config.database.url = "sqlite::memory:".to_owned();
    config
}

/// Resources backed by an in-memory database and the given provider
pub async fn create_test_resources(
    provider: Arc<dyn FoodDataProvider>,
) -> Result<Arc<ServerResources>> {
    init_test_logging();
    let config = test_config();
    let database = Database::new(&config.database.url).await?;
    Ok(Arc::new(ServerResources::new(config, database, provider)))
}

/// Full application router over the given provider
pub async fn create_test_router(provider: Arc<dyn FoodDataProvider>) -> Result<Router> {
    Ok(build_router(create_test_resources(provider).await?))
}

/// JSON POST request
pub fn json_post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// POST request with a raw body
pub fn raw_post(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Read a response body as JSON
pub async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Mock HTTP server running on an ephemeral local port
pub struct MockServer {
    pub base_url: String,
    pub handle: JoinHandle<()>,
}

impl MockServer {
    /// Serve `app` on `127.0.0.1:0`
    pub async fn spawn(app: Router) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            handle,
        })
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
