mod achievements;
mod config;
mod db;
mod errors;
mod integrations;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::integrations::analyzer::{BrandAnalyzer, HeuristicBrandAnalyzer, LlmBrandAnalyzer};
use crate::integrations::llm::LlmClient;
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

    info!("Starting Laurel API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis (fallback unlock store)
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone());
    info!(
        "LLM client initialized (model: {}, configured: {})",
        integrations::llm::MODEL,
        llm.is_configured()
    );

    // Initialize brand analyzer (HeuristicBrandAnalyzer by default — swap via
    // ENABLE_LLM_ANALYSIS)
    let analyzer: Arc<dyn BrandAnalyzer> = if config.enable_llm_analysis && llm.is_configured() {
        info!("Brand analyzer: llm");
        Arc::new(LlmBrandAnalyzer(llm))
    } else {
        info!("Brand analyzer: heuristic");
        Arc::new(HeuristicBrandAnalyzer)
    };

    // Shared HTTP client for third-party wrappers
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    // Build app state
    let state = AppState {
        db,
        redis,
        http,
        config: config.clone(),
        analyzer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
