//! Eligibility and progress evaluation.
//!
//! Both evaluators are pure functions of (definition, snapshot) and share one
//! current-vs-target decomposition, so `is_eligible` is true exactly when
//! `progress` reports 100 — consumers like "close to unlock" depend on the
//! two never drifting apart.

use std::collections::HashSet;

use serde::Serialize;

use crate::achievements::catalog::{AchievementDefinition, Category, Criteria, Rarity};
use crate::models::metrics::MetricsSnapshot;

/// Resolves a criteria to (current value, target value) against a snapshot.
fn current_and_target(criteria: Criteria, m: &MetricsSnapshot) -> (f64, f64) {
    match criteria {
        Criteria::ScoreThreshold { threshold } => (m.overall_score, threshold),
        Criteria::MetricThreshold { metric, threshold } => (metric.value_in(m), threshold),
        Criteria::Completeness { threshold } => (m.profile_completeness, threshold),
        Criteria::Consistency { days } => (m.active_day_streak as f64, days as f64),
        Criteria::ContentCount { count } => (m.content_count as f64, count as f64),
        Criteria::ContentViews { views } => (m.content_views as f64, views as f64),
        Criteria::ConnectionCount { count } => (m.connection_count as f64, count as f64),
        Criteria::EngagementCount { count } => (m.engagement_count as f64, count as f64),
        Criteria::LearningCompletion { count } => (m.learning_completed as f64, count as f64),
        Criteria::SkillCount { count } => (m.skill_count as f64, count as f64),
        Criteria::SkillEndorsements { count } => (m.skill_endorsements as f64, count as f64),
        Criteria::ArticleCount { count } => (m.article_count as f64, count as f64),
        Criteria::MentionCount { count } => (m.mention_count as f64, count as f64),
        Criteria::TotalViews { views } => (m.total_views as f64, views as f64),
    }
}

/// True when the snapshot meets the definition's target (inclusive bound).
pub fn is_eligible(def: &AchievementDefinition, m: &MetricsSnapshot) -> bool {
    let (current, target) = current_and_target(def.criteria, m);
    current >= target
}

/// Percentage progress toward the definition's target, 0..=100.
/// A non-positive target is vacuously met and reports 100.
pub fn progress(def: &AchievementDefinition, m: &MetricsSnapshot) -> u8 {
    let (current, target) = current_and_target(def.criteria, m);
    if target <= 0.0 || current >= target {
        return 100;
    }
    let pct = ((current / target * 100.0).round() as u64).min(100) as u8;
    // A target that is not actually met never rounds up to 100; 100 is
    // reserved for eligibility.
    pct.min(99)
}

/// One achievement's standing after an evaluation sweep.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluatedAchievement {
    pub code: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub rarity: Rarity,
    pub icon: &'static str,
    pub eligible: bool,
    pub progress: u8,
    pub already_unlocked: bool,
}

/// Evaluates the whole catalog against one snapshot. Pure: the caller decides
/// what to do with newly eligible entries (`eligible && !already_unlocked`).
pub fn evaluate_all(
    catalog: &'static [AchievementDefinition],
    m: &MetricsSnapshot,
    unlocked: &HashSet<String>,
) -> Vec<EvaluatedAchievement> {
    catalog
        .iter()
        .map(|def| EvaluatedAchievement {
            code: def.code,
            name: def.name,
            category: def.category,
            rarity: def.rarity,
            icon: def.icon,
            eligible: is_eligible(def, m),
            progress: progress(def, m),
            already_unlocked: unlocked.contains(def.code),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::catalog::CATALOG;
    use crate::models::metrics::MetricKey;

    fn def_with(criteria: Criteria) -> AchievementDefinition {
        AchievementDefinition {
            code: "test",
            name: "Test",
            description: "",
            category: Category::BrandScore,
            icon: "star",
            rarity: Rarity::Common,
            criteria,
        }
    }

    #[test]
    fn test_score_threshold_halfway() {
        let def = def_with(Criteria::ScoreThreshold { threshold: 80.0 });
        let m = MetricsSnapshot {
            overall_score: 40.0,
            ..Default::default()
        };
        assert_eq!(progress(&def, &m), 50);
        assert!(!is_eligible(&def, &m));
    }

    #[test]
    fn test_score_threshold_overshoot_clamps() {
        let def = def_with(Criteria::ScoreThreshold { threshold: 80.0 });
        let m = MetricsSnapshot {
            overall_score: 100.0,
            ..Default::default()
        };
        assert_eq!(progress(&def, &m), 100);
        assert!(is_eligible(&def, &m));
    }

    #[test]
    fn test_almost_met_target_does_not_round_to_100() {
        let def = def_with(Criteria::ScoreThreshold { threshold: 60.0 });
        let m = MetricsSnapshot {
            overall_score: 59.9, // 99.83%, which plain rounding would call 100
            ..Default::default()
        };
        assert_eq!(progress(&def, &m), 99);
        assert!(!is_eligible(&def, &m));
    }

    #[test]
    fn test_threshold_bound_is_inclusive() {
        let def = def_with(Criteria::ConnectionCount { count: 100 });
        let m = MetricsSnapshot {
            connection_count: 100,
            ..Default::default()
        };
        assert!(is_eligible(&def, &m));
    }

    #[test]
    fn test_zero_target_is_vacuously_met() {
        let def = def_with(Criteria::MetricThreshold {
            metric: MetricKey::MentionCount,
            threshold: 0.0,
        });
        let m = MetricsSnapshot::default();
        assert!(is_eligible(&def, &m));
        assert_eq!(progress(&def, &m), 100);
    }

    #[test]
    fn test_consistency_uses_streak_length() {
        let def = def_with(Criteria::Consistency { days: 7 });
        let m = MetricsSnapshot {
            active_day_streak: 3,
            ..Default::default()
        };
        assert!(!is_eligible(&def, &m));
        assert_eq!(progress(&def, &m), 43); // 3/7 rounds to 43

        let m = MetricsSnapshot {
            active_day_streak: 7,
            ..Default::default()
        };
        assert!(is_eligible(&def, &m));
        assert_eq!(progress(&def, &m), 100);
    }

    #[test]
    fn test_empty_snapshot_unlocks_nothing() {
        let m = MetricsSnapshot::default();
        for def in CATALOG {
            assert!(!is_eligible(def, &m), "{} eligible on empty metrics", def.code);
        }
    }

    /// eligible ⟺ progress == 100, for every catalog entry across a spread
    /// of snapshots.
    #[test]
    fn test_eligibility_and_progress_agree() {
        let snapshots = [
            MetricsSnapshot::default(),
            MetricsSnapshot {
                overall_score: 95.0,
                engagement_rate: 5.0,
                profile_completeness: 100.0,
                content_count: 50,
                content_views: 10_000,
                connection_count: 1000,
                engagement_count: 100,
                learning_completed: 10,
                skill_count: 15,
                skill_endorsements: 50,
                article_count: 10,
                mention_count: 5,
                total_views: 100_000,
                active_day_streak: 30,
                ..Default::default()
            },
            MetricsSnapshot {
                overall_score: 59.9,
                profile_completeness: 69.9,
                content_count: 49,
                connection_count: 499,
                active_day_streak: 6,
                ..Default::default()
            },
        ];
        for m in &snapshots {
            for def in CATALOG {
                assert_eq!(
                    is_eligible(def, m),
                    progress(def, m) == 100,
                    "evaluators disagree on {}",
                    def.code
                );
            }
        }
    }

    #[test]
    fn test_reevaluation_is_stable() {
        let m = MetricsSnapshot {
            overall_score: 63.0,
            content_count: 12,
            ..Default::default()
        };
        let unlocked = HashSet::new();
        let a = evaluate_all(CATALOG, &m, &unlocked);
        let b = evaluate_all(CATALOG, &m, &unlocked);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.eligible, y.eligible);
            assert_eq!(x.progress, y.progress);
        }
    }

    #[test]
    fn test_already_unlocked_flag() {
        let m = MetricsSnapshot::default();
        let unlocked: HashSet<String> = ["first_post".to_string()].into();
        let evaluated = evaluate_all(CATALOG, &m, &unlocked);
        let first_post = evaluated.iter().find(|e| e.code == "first_post").unwrap();
        assert!(first_post.already_unlocked);
        assert!(!first_post.eligible);
    }
}
