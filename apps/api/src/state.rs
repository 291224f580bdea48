use std::sync::Arc;

use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::integrations::analyzer::BrandAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Fallback unlock store. Written opportunistically on every successful
    /// Postgres read so a later outage can still serve the unlock list.
    pub redis: RedisClient,
    /// Shared HTTP client for the GitHub / search / LinkedIn wrappers.
    pub http: reqwest::Client,
    pub config: Config,
    /// Pluggable brand analyzer. Default: HeuristicBrandAnalyzer.
    /// Swap via ENABLE_LLM_ANALYSIS env.
    pub analyzer: Arc<dyn BrandAnalyzer>,
}
