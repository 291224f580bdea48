pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::achievements::handlers as achievements;
use crate::integrations::handlers as integrations;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Achievements API
        .route(
            "/api/v1/achievements/evaluate",
            post(achievements::handle_evaluate),
        )
        .route("/api/v1/achievements", get(achievements::handle_list))
        .route(
            "/api/v1/achievements/unlocks",
            get(achievements::handle_unlocks),
        )
        .route(
            "/api/v1/achievements/streaks",
            get(achievements::handle_streaks),
        )
        .route(
            "/api/v1/achievements/collections",
            get(achievements::handle_collections),
        )
        .route("/api/v1/achievements/paths", get(achievements::handle_paths))
        .route(
            "/api/v1/achievements/timeline",
            get(achievements::handle_timeline),
        )
        .route(
            "/api/v1/achievements/velocity",
            get(achievements::handle_velocity),
        )
        .route(
            "/api/v1/achievements/comparison",
            get(achievements::handle_comparison),
        )
        .route(
            "/api/v1/achievements/recommendations",
            post(achievements::handle_recommendations),
        )
        .route(
            "/api/v1/achievements/export/csv",
            get(achievements::handle_export_csv),
        )
        .route(
            "/api/v1/achievements/export/json",
            get(achievements::handle_export_json),
        )
        .route("/api/v1/achievements/share", get(achievements::handle_share))
        // Analysis & third-party integrations
        .route("/api/v1/analysis/brand", post(integrations::handle_analyze))
        .route(
            "/api/v1/integrations/github/:username",
            get(integrations::handle_github),
        )
        .route(
            "/api/v1/integrations/mentions",
            get(integrations::handle_mentions),
        )
        .route(
            "/api/v1/integrations/linkedin/authorize-url",
            get(integrations::handle_linkedin_authorize_url),
        )
        .route(
            "/api/v1/integrations/linkedin/token",
            post(integrations::handle_linkedin_token),
        )
        .with_state(state)
}
