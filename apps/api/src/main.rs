mod analysis;
mod config;
mod errors;
mod llm_client;
mod models;
mod report;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::CareerAnalyzer;
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::report::PdfReportRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerPath API v{}", env!("CARGO_PKG_VERSION"));

    // One client, one connection pool, shared by every request
    let gemini = GeminiClient::new(
        config.gemini_api_url.clone(),
        config.gemini_api_key.clone(),
        config.http_timeout,
    )?;
    info!(
        "Completion client initialized (timeout: {}s)",
        config.http_timeout.as_secs()
    );

    let state = AppState {
        analyzer: CareerAnalyzer::new(Arc::new(gemini)),
        renderer: Arc::new(PdfReportRenderer::default()),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
