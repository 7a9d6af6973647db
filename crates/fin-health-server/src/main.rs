//! Financial health analysis server.
//!
//! # Endpoints
//!
//! - `POST /api/v1/analyze` - Analyse a `{periods, assumptions}` payload
//! - `GET /api/v1/health` - Health check
//!
//! # Environment
//!
//! - `FIN_HEALTH_ADDR` - listen address (default `0.0.0.0:8080`)
//! - `FIN_HEALTH_CONFIG` - optional engine config file (JSON)
//! - `RUST_LOG` - log filter

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod rest;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    info!("Starting financial health server...");

    let config = config::ServerConfig::from_env()?;
    let engine = Arc::new(config.load_engine_config()?);

    info!("Configuration loaded");
    info!(
        "  Engine config: {}",
        config.engine_config_path.as_deref().unwrap_or("built-in defaults")
    );

    let addr: SocketAddr = config.addr.parse()?;
    info!("Starting REST server on {}", addr);

    let app = rest::create_router(engine);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
