//! rust-chat HTTP Server
//!
//! Axum-based relay between the browser widget and Azure OpenAI. Serves
//! the compiled widget bundle alongside the REST endpoints.

mod handlers;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chat_core::ReplyProvider;
use chat_runtime::AzureOpenAi;

use crate::handlers::{chat_handler, health_check};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize the upstream provider
    let provider = Arc::new(
        AzureOpenAi::from_env().context("Azure OpenAI configuration is incomplete")?,
    );

    // Verify upstream connection
    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ Connected to Azure OpenAI"),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Azure OpenAI not reachable - chat requests will fail");
            tracing::warn!("  Check the AZURE_OPENAI_* endpoint and AZURE_* credential variables");
        }
    }

    // Build application state
    let state = AppState::new(provider);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/chat", post(chat_handler))
        // Static files (WASM widget)
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 rust-chat gateway running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health - Health check");
    tracing::info!("  POST /chat   - Relay a user message");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
