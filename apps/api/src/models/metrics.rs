use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One brand-metrics snapshot, supplied per evaluation call by the analysis
/// layer (or directly by the caller).
///
/// Upstream producers have drifted on field names over time, so the legacy
/// spellings are absorbed here as serde aliases. Past this struct, every
/// metric has exactly one name and a zero default — evaluators never do
/// first-key-that-exists lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSnapshot {
    #[serde(alias = "overall")]
    pub overall_score: f64,
    pub engagement_rate: f64,
    #[serde(alias = "completeness")]
    pub profile_completeness: f64,
    #[serde(alias = "posts")]
    pub content_count: u32,
    #[serde(alias = "post_views")]
    pub content_views: u64,
    #[serde(alias = "connections")]
    pub connection_count: u32,
    #[serde(alias = "interactions")]
    pub engagement_count: u32,
    #[serde(alias = "courses_completed")]
    pub learning_completed: u32,
    #[serde(alias = "skills")]
    pub skill_count: u32,
    #[serde(alias = "endorsements")]
    pub skill_endorsements: u32,
    #[serde(alias = "articles")]
    pub article_count: u32,
    #[serde(alias = "mentions")]
    pub mention_count: u32,
    #[serde(alias = "profile_views")]
    pub total_views: u64,
    pub last_active_date: Option<NaiveDate>,
    /// Consecutive active days ending at the evaluation date. Derived from
    /// the unlock ledger by the caller, never self-reported.
    pub active_day_streak: u32,
}

/// Names a numeric snapshot field, for criteria that target a metric chosen
/// per-definition rather than baked into the criteria kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    OverallScore,
    EngagementRate,
    ProfileCompleteness,
    ContentCount,
    ContentViews,
    ConnectionCount,
    EngagementCount,
    LearningCompleted,
    SkillCount,
    SkillEndorsements,
    ArticleCount,
    MentionCount,
    TotalViews,
}

impl MetricKey {
    pub fn value_in(self, m: &MetricsSnapshot) -> f64 {
        match self {
            MetricKey::OverallScore => m.overall_score,
            MetricKey::EngagementRate => m.engagement_rate,
            MetricKey::ProfileCompleteness => m.profile_completeness,
            MetricKey::ContentCount => m.content_count as f64,
            MetricKey::ContentViews => m.content_views as f64,
            MetricKey::ConnectionCount => m.connection_count as f64,
            MetricKey::EngagementCount => m.engagement_count as f64,
            MetricKey::LearningCompleted => m.learning_completed as f64,
            MetricKey::SkillCount => m.skill_count as f64,
            MetricKey::SkillEndorsements => m.skill_endorsements as f64,
            MetricKey::ArticleCount => m.article_count as f64,
            MetricKey::MentionCount => m.mention_count as f64,
            MetricKey::TotalViews => m.total_views as f64,
        }
    }
}
