//! Axum route handlers for brand analysis and the third-party wrappers.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::achievements::streaks::compute_streaks;
use crate::achievements::unlocks::fetch_unlocks;
use crate::errors::AppError;
use crate::integrations::analyzer::BrandProfile;
use crate::integrations::github::{self, GithubSignals};
use crate::integrations::linkedin::{self, OauthConfig};
use crate::integrations::serper::{self, MentionReport};
use crate::models::metrics::MetricsSnapshot;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Brand analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub user_id: Uuid,
    pub profile: BrandProfile,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub metrics: MetricsSnapshot,
    pub analyzer_backend: &'static str,
}

/// POST /api/v1/analysis/brand
///
/// Produces a metrics snapshot from raw profile facts. The snapshot comes
/// back with `active_day_streak` filled from the unlock ledger, so it can be
/// fed straight into the evaluate endpoint.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut metrics = state.analyzer.analyze(&request.profile).await?;

    let records = fetch_unlocks(&state.db, &state.redis, request.user_id).await;
    let streak = compute_streaks(&records, Utc::now().date_naive());
    metrics.active_day_streak = streak.current_streak;

    let analyzer_backend = if state.config.enable_llm_analysis {
        "llm"
    } else {
        "heuristic"
    };
    Ok(Json(AnalyzeResponse {
        metrics,
        analyzer_backend,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// GitHub
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/integrations/github/:username
pub async fn handle_github(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<GithubSignals>, AppError> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("username cannot be empty".to_string()));
    }
    let signals = github::fetch_signals(
        &state.http,
        state.config.github_token.as_deref(),
        username.trim(),
    )
    .await?;
    Ok(Json(signals))
}

// ────────────────────────────────────────────────────────────────────────────
// Web mentions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MentionsQuery {
    pub query: String,
}

/// GET /api/v1/integrations/mentions
pub async fn handle_mentions(
    State(state): State<AppState>,
    Query(params): Query<MentionsQuery>,
) -> Result<Json<MentionReport>, AppError> {
    if params.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }
    let report = serper::count_mentions(
        &state.http,
        state.config.serper_api_key.as_deref(),
        params.query.trim(),
    )
    .await?;
    Ok(Json(report))
}

// ────────────────────────────────────────────────────────────────────────────
// LinkedIn OAuth
// ────────────────────────────────────────────────────────────────────────────

fn oauth_config(state: &AppState) -> Result<OauthConfig<'_>, AppError> {
    match (
        state.config.linkedin_client_id.as_deref(),
        state.config.linkedin_client_secret.as_deref(),
        state.config.linkedin_redirect_uri.as_deref(),
    ) {
        (Some(client_id), Some(client_secret), Some(redirect_uri)) => Ok(OauthConfig {
            client_id,
            client_secret,
            redirect_uri,
        }),
        _ => Err(AppError::NotConfigured("LinkedIn OAuth")),
    }
}

#[derive(Deserialize)]
pub struct AuthorizeQuery {
    pub state: String,
}

#[derive(Debug, Serialize)]
pub struct AuthorizeUrlResponse {
    pub authorize_url: String,
}

/// GET /api/v1/integrations/linkedin/authorize-url
pub async fn handle_linkedin_authorize_url(
    State(state): State<AppState>,
    Query(params): Query<AuthorizeQuery>,
) -> Result<Json<AuthorizeUrlResponse>, AppError> {
    if params.state.trim().is_empty() {
        return Err(AppError::Validation("state cannot be empty".to_string()));
    }
    let config = oauth_config(&state)?;
    Ok(Json(AuthorizeUrlResponse {
        authorize_url: linkedin::authorize_url(&config, &params.state)?,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct TokenExchangeResponse {
    pub token: linkedin::TokenResponse,
    pub profile: linkedin::LinkedInProfile,
}

/// POST /api/v1/integrations/linkedin/token
///
/// Exchanges the authorization code and immediately resolves the profile, so
/// callers get identity in one round trip. The token is passed through, not
/// stored.
pub async fn handle_linkedin_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenExchangeResponse>, AppError> {
    if request.code.trim().is_empty() {
        return Err(AppError::Validation("code cannot be empty".to_string()));
    }
    let config = oauth_config(&state)?;
    let token = linkedin::exchange_code(&state.http, &config, request.code.trim()).await?;
    let profile = linkedin::fetch_profile(&state.http, &token.access_token).await?;
    Ok(Json(TokenExchangeResponse { token, profile }))
}
