//! Brand analysis — pluggable, trait-based producer of metrics snapshots.
//!
//! Default: `HeuristicBrandAnalyzer` (pure-Rust, fast, deterministic, fully
//! testable). Alternative: `LlmBrandAnalyzer` (semantic, via the completion
//! API), swapped at startup via ENABLE_LLM_ANALYSIS.
//!
//! `AppState` holds an `Arc<dyn BrandAnalyzer>`.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::integrations::llm::LlmClient;
use crate::models::metrics::MetricsSnapshot;

/// Raw profile facts supplied by the caller. Counts are taken at face value;
/// the analyzer's job is turning them into bounded scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandProfile {
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub has_photo: bool,
    pub skills: Vec<String>,
    pub skill_endorsements: u32,
    pub experience_entries: u32,
    pub education_entries: u32,
    pub connection_count: u32,
    pub posts_90d: u32,
    pub post_views_90d: u64,
    pub interactions_90d: u32,
    pub article_count: u32,
    pub courses_completed: u32,
    pub mention_count: u32,
    pub profile_views: u64,
    pub last_active_date: Option<NaiveDate>,
}

#[async_trait]
pub trait BrandAnalyzer: Send + Sync {
    async fn analyze(&self, profile: &BrandProfile) -> Result<MetricsSnapshot, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicBrandAnalyzer — deterministic default
// ────────────────────────────────────────────────────────────────────────────

/// Section weights for profile completeness, summing to 1.0.
const COMPLETENESS_WEIGHTS: &[(Section, f64)] = &[
    (Section::Headline, 0.15),
    (Section::Summary, 0.20),
    (Section::Photo, 0.10),
    (Section::Skills, 0.20),
    (Section::Experience, 0.25),
    (Section::Education, 0.10),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Headline,
    Summary,
    Photo,
    Skills,
    Experience,
    Education,
}

/// A section counts as filled once it has real content; skills want at least
/// five entries before the section is considered done.
fn section_filled(section: Section, p: &BrandProfile) -> bool {
    match section {
        Section::Headline => p.headline.as_deref().is_some_and(|h| !h.trim().is_empty()),
        Section::Summary => p.summary.as_deref().is_some_and(|s| !s.trim().is_empty()),
        Section::Photo => p.has_photo,
        Section::Skills => p.skills.len() >= 5,
        Section::Experience => p.experience_entries > 0,
        Section::Education => p.education_entries > 0,
    }
}

fn completeness_score(p: &BrandProfile) -> f64 {
    let filled: f64 = COMPLETENESS_WEIGHTS
        .iter()
        .filter(|(section, _)| section_filled(*section, p))
        .map(|(_, w)| w)
        .sum();
    (filled * 100.0).clamp(0.0, 100.0)
}

/// Saturating count-to-score: `count` of `target` reaches 100.
fn saturating_score(count: f64, target: f64) -> f64 {
    (count / target * 100.0).clamp(0.0, 100.0)
}

pub struct HeuristicBrandAnalyzer;

impl HeuristicBrandAnalyzer {
    fn snapshot(p: &BrandProfile) -> MetricsSnapshot {
        let completeness = completeness_score(p);
        let engagement_rate = if p.post_views_90d == 0 {
            0.0
        } else {
            (p.interactions_90d as f64 / p.post_views_90d as f64 * 100.0).clamp(0.0, 100.0)
        };

        // Overall: completeness 30%, content activity 25%, network 25%,
        // engagement 20%. Sub-scores saturate at round targets so early
        // profiles still see movement.
        let content_score = saturating_score(p.posts_90d as f64, 30.0);
        let network_score = saturating_score(p.connection_count as f64, 500.0);
        let engagement_score = saturating_score(p.interactions_90d as f64, 200.0);
        let overall_score = (completeness * 0.30
            + content_score * 0.25
            + network_score * 0.25
            + engagement_score * 0.20)
            .clamp(0.0, 100.0);

        MetricsSnapshot {
            overall_score,
            engagement_rate,
            profile_completeness: completeness,
            content_count: p.posts_90d,
            content_views: p.post_views_90d,
            connection_count: p.connection_count,
            engagement_count: p.interactions_90d,
            learning_completed: p.courses_completed,
            skill_count: p.skills.len() as u32,
            skill_endorsements: p.skill_endorsements,
            article_count: p.article_count,
            mention_count: p.mention_count,
            total_views: p.profile_views,
            last_active_date: p.last_active_date,
            // Derived from the unlock ledger by the caller, not by analysis.
            active_day_streak: 0,
        }
    }
}

#[async_trait]
impl BrandAnalyzer for HeuristicBrandAnalyzer {
    async fn analyze(&self, profile: &BrandProfile) -> Result<MetricsSnapshot, AppError> {
        Ok(Self::snapshot(profile))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmBrandAnalyzer — semantic scoring via the completion API
// ────────────────────────────────────────────────────────────────────────────

const ANALYSIS_SYSTEM: &str = "You are a personal-brand analyst. You receive a \
JSON object describing a professional profile and return ONLY a JSON object \
with these numeric fields: overall_score (0-100), engagement_rate (0-100), \
profile_completeness (0-100), content_count, content_views, connection_count, \
engagement_count, learning_completed, skill_count, skill_endorsements, \
article_count, mention_count, total_views. No prose, no markdown.";

pub struct LlmBrandAnalyzer(pub LlmClient);

#[async_trait]
impl BrandAnalyzer for LlmBrandAnalyzer {
    async fn analyze(&self, profile: &BrandProfile) -> Result<MetricsSnapshot, AppError> {
        let prompt = serde_json::to_string(profile).map_err(|e| anyhow::anyhow!(e))?;
        let mut snapshot: MetricsSnapshot = self.0.call_json(&prompt, ANALYSIS_SYSTEM).await?;

        // The model scores, but it does not get to invent activity facts.
        snapshot.overall_score = snapshot.overall_score.clamp(0.0, 100.0);
        snapshot.engagement_rate = snapshot.engagement_rate.clamp(0.0, 100.0);
        snapshot.profile_completeness = snapshot.profile_completeness.clamp(0.0, 100.0);
        snapshot.last_active_date = profile.last_active_date;
        snapshot.active_day_streak = 0;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_profile() -> BrandProfile {
        BrandProfile {
            headline: Some("Platform engineer".to_string()),
            summary: Some("I build things.".to_string()),
            has_photo: true,
            skills: vec!["rust", "sql", "k8s", "grpc", "ci"]
                .into_iter()
                .map(String::from)
                .collect(),
            skill_endorsements: 12,
            experience_entries: 3,
            education_entries: 1,
            connection_count: 500,
            posts_90d: 30,
            post_views_90d: 20_000,
            interactions_90d: 400,
            article_count: 2,
            courses_completed: 1,
            mention_count: 1,
            profile_views: 3_000,
            last_active_date: None,
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = COMPLETENESS_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9, "weights sum to {sum}");
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        let snapshot = HeuristicBrandAnalyzer::snapshot(&BrandProfile::default());
        assert_eq!(snapshot.profile_completeness, 0.0);
        assert_eq!(snapshot.overall_score, 0.0);
        assert_eq!(snapshot.engagement_rate, 0.0);
    }

    #[test]
    fn test_full_profile_completeness_is_100() {
        let snapshot = HeuristicBrandAnalyzer::snapshot(&full_profile());
        assert!((snapshot.profile_completeness - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_scores_bounded() {
        let mut p = full_profile();
        p.connection_count = 1_000_000;
        p.posts_90d = 10_000;
        p.interactions_90d = u32::MAX;
        p.post_views_90d = 1;
        let snapshot = HeuristicBrandAnalyzer::snapshot(&p);
        assert!(snapshot.overall_score <= 100.0);
        assert!(snapshot.engagement_rate <= 100.0);
        assert!(snapshot.profile_completeness <= 100.0);
    }

    #[test]
    fn test_four_skills_is_an_unfilled_section() {
        let mut p = full_profile();
        p.skills.truncate(4);
        let snapshot = HeuristicBrandAnalyzer::snapshot(&p);
        assert!((snapshot.profile_completeness - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_counts_pass_through_untouched() {
        let snapshot = HeuristicBrandAnalyzer::snapshot(&full_profile());
        assert_eq!(snapshot.connection_count, 500);
        assert_eq!(snapshot.article_count, 2);
        assert_eq!(snapshot.skill_count, 5);
        assert_eq!(snapshot.active_day_streak, 0);
    }

    #[tokio::test]
    async fn test_heuristic_analyzer_is_deterministic() {
        let analyzer = HeuristicBrandAnalyzer;
        let p = full_profile();
        let a = analyzer.analyze(&p).await.unwrap();
        let b = analyzer.analyze(&p).await.unwrap();
        assert_eq!(a, b);
    }
}
