//! Axum route handlers for the achievements API.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::achievements::catalog::{self, AchievementDefinition, CATALOG};
use crate::achievements::collections::{collection_progress, path_progress, CollectionProgress, PathProgress};
use crate::achievements::criteria::{evaluate_all, EvaluatedAchievement};
use crate::achievements::export;
use crate::achievements::notifications::{near_unlock_nudges, unlock_notification, Notification};
use crate::achievements::recommend::{recommend, Recommendation};
use crate::achievements::share::{build_share_card, build_summary_line, ShareCard};
use crate::achievements::streaks::{compute_streaks, StreakSummary};
use crate::achievements::timeline::{build_timeline, compare, compute_velocity, ComparisonReport, TimelinePoint, VelocityReport};
use crate::achievements::unlocks::{fetch_unlocks, record_unlock, unlocked_codes};
use crate::errors::AppError;
use crate::models::metrics::MetricsSnapshot;
use crate::models::unlock::UnlockRecord;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Evaluation sweep
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub user_id: Uuid,
    pub metrics: MetricsSnapshot,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub achievements: Vec<EvaluatedAchievement>,
    pub newly_unlocked: Vec<&'static str>,
    pub notifications: Vec<Notification>,
    pub streak: StreakSummary,
}

/// POST /api/v1/achievements/evaluate
///
/// Evaluates the whole catalog against a metrics snapshot and records any
/// newly eligible unlocks. Not transactional: a concurrent sweep for the same
/// user is collapsed by the unique (user, code) constraint, so both report
/// success and exactly one record exists.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let records = fetch_unlocks(&state.db, &state.redis, request.user_id).await;
    let today = Utc::now().date_naive();
    let streak = compute_streaks(&records, today);

    // The snapshot's streak comes from the unlock ledger, never the caller.
    let mut metrics = request.metrics;
    metrics.active_day_streak = streak.current_streak;

    let unlocked = unlocked_codes(&records);
    let evaluated = evaluate_all(CATALOG, &metrics, &unlocked);

    let mut newly_unlocked = Vec::new();
    let mut notifications = Vec::new();
    for entry in evaluated.iter().filter(|e| e.eligible && !e.already_unlocked) {
        let metadata = json!({ "source": "evaluation", "overall_score": metrics.overall_score });
        match record_unlock(&state.db, &state.redis, request.user_id, entry.code, metadata).await {
            Ok(outcome) if outcome.created => {
                info!("User {} unlocked {}", request.user_id, entry.code);
                newly_unlocked.push(entry.code);
                if let Some(def) = catalog::find(entry.code) {
                    notifications.push(unlock_notification(def));
                }
            }
            // Lost a race with a concurrent sweep; the other one notified.
            Ok(_) => {}
            Err(e) => warn!("Skipping unlock record for {}: {e}", entry.code),
        }
    }
    notifications.extend(near_unlock_nudges(&evaluated));

    Ok(Json(EvaluateResponse {
        achievements: evaluated,
        newly_unlocked,
        notifications,
        streak,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog & unlock listings
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AchievementStatus {
    #[serde(flatten)]
    pub definition: &'static AchievementDefinition,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct AchievementListResponse {
    pub achievements: Vec<AchievementStatus>,
    pub unlocked: usize,
    pub total: usize,
}

/// GET /api/v1/achievements
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AchievementListResponse>, AppError> {
    let records = fetch_unlocks(&state.db, &state.redis, params.user_id).await;
    let achievements: Vec<AchievementStatus> = CATALOG
        .iter()
        .map(|def| {
            let record = records.iter().find(|r| r.achievement_code == def.code);
            AchievementStatus {
                definition: def,
                unlocked: record.is_some(),
                unlocked_at: record.map(|r| r.unlocked_at),
            }
        })
        .collect();
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    Ok(Json(AchievementListResponse {
        achievements,
        unlocked,
        total: CATALOG.len(),
    }))
}

/// GET /api/v1/achievements/unlocks
pub async fn handle_unlocks(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<UnlockRecord>>, AppError> {
    Ok(Json(fetch_unlocks(&state.db, &state.redis, params.user_id).await))
}

// ────────────────────────────────────────────────────────────────────────────
// Derived views
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/achievements/streaks
pub async fn handle_streaks(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<StreakSummary>, AppError> {
    let records = fetch_unlocks(&state.db, &state.redis, params.user_id).await;
    Ok(Json(compute_streaks(&records, Utc::now().date_naive())))
}

/// GET /api/v1/achievements/collections
pub async fn handle_collections(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CollectionProgress>>, AppError> {
    let records = fetch_unlocks(&state.db, &state.redis, params.user_id).await;
    Ok(Json(collection_progress(&unlocked_codes(&records))))
}

/// GET /api/v1/achievements/paths
pub async fn handle_paths(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<PathProgress>>, AppError> {
    let records = fetch_unlocks(&state.db, &state.redis, params.user_id).await;
    Ok(Json(path_progress(&unlocked_codes(&records))))
}

/// GET /api/v1/achievements/timeline
pub async fn handle_timeline(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<TimelinePoint>>, AppError> {
    let records = fetch_unlocks(&state.db, &state.redis, params.user_id).await;
    Ok(Json(build_timeline(&records)))
}

/// GET /api/v1/achievements/velocity
pub async fn handle_velocity(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<VelocityReport>, AppError> {
    let records = fetch_unlocks(&state.db, &state.redis, params.user_id).await;
    Ok(Json(compute_velocity(&records, Utc::now().date_naive())))
}

/// GET /api/v1/achievements/comparison
pub async fn handle_comparison(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ComparisonReport>, AppError> {
    let records = fetch_unlocks(&state.db, &state.redis, params.user_id).await;
    Ok(Json(compare(&unlocked_codes(&records))))
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendations
// ────────────────────────────────────────────────────────────────────────────

const DEFAULT_RECOMMENDATIONS: usize = 5;
const MAX_RECOMMENDATIONS: usize = 20;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub user_id: Uuid,
    pub metrics: MetricsSnapshot,
    pub limit: Option<usize>,
}

/// POST /api/v1/achievements/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<Vec<Recommendation>>, AppError> {
    let limit = request.limit.unwrap_or(DEFAULT_RECOMMENDATIONS);
    if limit == 0 || limit > MAX_RECOMMENDATIONS {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_RECOMMENDATIONS}"
        )));
    }

    let records = fetch_unlocks(&state.db, &state.redis, request.user_id).await;
    let streak = compute_streaks(&records, Utc::now().date_naive());
    let mut metrics = request.metrics;
    metrics.active_day_streak = streak.current_streak;

    Ok(Json(recommend(
        CATALOG,
        &metrics,
        &unlocked_codes(&records),
        limit,
    )))
}

// ────────────────────────────────────────────────────────────────────────────
// Export & share
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/achievements/export/csv
pub async fn handle_export_csv(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Response, AppError> {
    let records = fetch_unlocks(&state.db, &state.redis, params.user_id).await;
    let today = Utc::now().date_naive();
    let csv = export::to_csv(&export::build_export_rows(&records, today));
    Ok(download_response(csv, "text/csv", &export::csv_filename(today)))
}

/// GET /api/v1/achievements/export/json
pub async fn handle_export_json(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Response, AppError> {
    let records = fetch_unlocks(&state.db, &state.redis, params.user_id).await;
    let today = Utc::now().date_naive();
    let envelope = export::to_json(export::build_export_rows(&records, today), today);
    let body = serde_json::to_string_pretty(&envelope).map_err(|e| anyhow::anyhow!(e))?;
    Ok(download_response(
        body,
        "application/json",
        &export::json_filename(today),
    ))
}

fn download_response(body: String, content_type: &str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct ShareQuery {
    pub user_id: Uuid,
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub card: Option<ShareCard>,
    pub summary: String,
}

/// GET /api/v1/achievements/share
///
/// With `code`, returns a share card for that unlocked achievement; without,
/// just the profile summary line.
pub async fn handle_share(
    State(state): State<AppState>,
    Query(params): Query<ShareQuery>,
) -> Result<Json<ShareResponse>, AppError> {
    let records = fetch_unlocks(&state.db, &state.redis, params.user_id).await;

    let card = match &params.code {
        Some(code) => {
            let def = catalog::find(code)
                .ok_or_else(|| AppError::NotFound(format!("Achievement '{code}' not found")))?;
            let record = records
                .iter()
                .find(|r| r.achievement_code == *code)
                .ok_or_else(|| {
                    AppError::Validation(format!("Achievement '{code}' is not unlocked yet"))
                })?;
            Some(build_share_card(def, record.unlocked_at))
        }
        None => None,
    };

    let summary = build_summary_line(&compare(&unlocked_codes(&records)));
    Ok(Json(ShareResponse { card, summary }))
}
