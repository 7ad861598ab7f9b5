// ABOUTME: Server binary for the Caloriq calorie lookup API
// ABOUTME: Loads configuration, wires the USDA client and user store, and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! # Caloriq Server Binary

use anyhow::{Context, Result};
use clap::Parser;
use caloriq_server::{
    config::environment::ServerConfig,
    database::Database,
    external::{UsdaClient, UsdaClientConfig},
    logging,
    resources::ServerResources,
    routes::build_router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "caloriq-server")]
#[command(about = "Caloriq API - dish calorie estimates from USDA FoodData Central")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;
    info!("{}", config.summary());

    if !config.usda.has_api_key() {
        warn!("USDA_API_KEY is not set; calorie lookups will fail with 500 until it is configured");
    }

    let database = Database::new(&config.database.url).await?;
    let usda = UsdaClient::new(UsdaClientConfig::from(&config.usda))?;

    let bind_address = config.bind_address();
    let resources = Arc::new(ServerResources::new(config, database, Arc::new(usda)));
    let app = build_router(resources);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    info!("Caloriq server listening on http://{}", bind_address);
    display_available_endpoints(&bind_address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Caloriq server stopped");
    Ok(())
}

fn display_available_endpoints(bind_address: &str) {
    info!("=== Available API Endpoints ===");
    info!("   Health:       GET  http://{bind_address}/health");
    info!("   Readiness:    GET  http://{bind_address}/ready");
    info!("   Calories:     POST http://{bind_address}/api/auth/getCalories");
    info!("   Register:     POST http://{bind_address}/api/auth/register");
    info!("   Sign in:      POST http://{bind_address}/api/auth/signin");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("Shutdown signal received, draining connections");
}
