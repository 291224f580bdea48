//! Recommendation ranking over locked achievements.
//!
//! priority = 0.4 × progress
//!          + difficulty bonus (tiered on the remaining gap)
//!          + rarity bonus
//!          + category-affinity bonus (share of the category already unlocked)

use std::collections::HashSet;

use serde::Serialize;

use crate::achievements::catalog::{AchievementDefinition, Category, Rarity};
use crate::achievements::criteria;
use crate::models::metrics::MetricsSnapshot;

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub rarity: Rarity,
    pub icon: &'static str,
    pub progress: u8,
    pub priority: f64,
    pub reason: String,
}

fn difficulty_bonus(gap: u8) -> f64 {
    match gap {
        0..=10 => 30.0,
        11..=25 => 20.0,
        26..=50 => 10.0,
        _ => 0.0,
    }
}

fn rarity_bonus(rarity: Rarity) -> f64 {
    match rarity {
        Rarity::Common => 4.0,
        Rarity::Rare => 6.0,
        Rarity::Epic => 8.0,
        Rarity::Legendary => 10.0,
    }
}

fn affinity_bonus(category: Category, catalog: &[AchievementDefinition], unlocked: &HashSet<String>) -> f64 {
    let in_category: Vec<_> = catalog.iter().filter(|d| d.category == category).collect();
    if in_category.is_empty() {
        return 0.0;
    }
    let hit = in_category.iter().filter(|d| unlocked.contains(d.code)).count();
    6.0 * hit as f64 / in_category.len() as f64
}

fn reason_for(name: &str, progress: u8, rarity: Rarity) -> String {
    match rarity {
        _ if progress >= 90 => format!("{name} is within reach, you are at {progress}%."),
        _ if progress >= 50 => format!("You are over halfway to {name} ({progress}%)."),
        Rarity::Epic => format!("{name} is an epic badge worth working toward."),
        Rarity::Legendary => format!("{name} is a legendary badge worth working toward."),
        _ => format!("{name} would round out your profile."),
    }
}

/// Ranks locked achievements, highest priority first. Ties break on code so
/// the ordering is stable for identical inputs.
pub fn recommend(
    catalog: &'static [AchievementDefinition],
    m: &MetricsSnapshot,
    unlocked: &HashSet<String>,
    limit: usize,
) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = catalog
        .iter()
        .filter(|d| !unlocked.contains(d.code))
        .map(|d| {
            let progress = criteria::progress(d, m);
            let gap = 100 - progress;
            let priority = 0.4 * progress as f64
                + difficulty_bonus(gap)
                + rarity_bonus(d.rarity)
                + affinity_bonus(d.category, catalog, unlocked);
            Recommendation {
                code: d.code,
                name: d.name,
                description: d.description,
                category: d.category,
                rarity: d.rarity,
                icon: d.icon,
                progress,
                priority,
                reason: reason_for(d.name, progress, d.rarity),
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.code.cmp(b.code))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::catalog::CATALOG;

    #[test]
    fn test_unlocked_achievements_are_excluded() {
        let unlocked: HashSet<String> = ["first_post".to_string()].into();
        let recs = recommend(CATALOG, &MetricsSnapshot::default(), &unlocked, 50);
        assert!(recs.iter().all(|r| r.code != "first_post"));
        assert_eq!(recs.len(), CATALOG.len() - 1);
    }

    #[test]
    fn test_near_complete_achievement_ranks_first() {
        let m = MetricsSnapshot {
            connection_count: 95, // 95% toward first_hundred
            ..Default::default()
        };
        let recs = recommend(CATALOG, &m, &HashSet::new(), 5);
        assert_eq!(recs[0].code, "first_hundred");
        assert!(recs[0].priority > recs[1].priority);
    }

    #[test]
    fn test_limit_is_honored() {
        let recs = recommend(CATALOG, &MetricsSnapshot::default(), &HashSet::new(), 3);
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn test_ordering_is_stable_across_calls() {
        let m = MetricsSnapshot {
            overall_score: 30.0,
            content_count: 5,
            ..Default::default()
        };
        let a = recommend(CATALOG, &m, &HashSet::new(), 10);
        let b = recommend(CATALOG, &m, &HashSet::new(), 10);
        let codes_a: Vec<_> = a.iter().map(|r| r.code).collect();
        let codes_b: Vec<_> = b.iter().map(|r| r.code).collect();
        assert_eq!(codes_a, codes_b);
    }

    #[test]
    fn test_category_affinity_lifts_same_category() {
        // Two networking unlocks should lift the remaining networking badge
        // relative to an otherwise identical zero-progress field.
        let unlocked: HashSet<String> = ["first_hundred".to_string(), "super_connector".to_string()]
            .into_iter()
            .collect();
        let recs = recommend(CATALOG, &MetricsSnapshot::default(), &unlocked, 50);
        let elite = recs.iter().find(|r| r.code == "networking_elite").unwrap();
        let other_epic = recs.iter().find(|r| r.code == "viral_moment").unwrap();
        assert!(elite.priority > other_epic.priority);
    }

    #[test]
    fn test_reason_mentions_progress_when_close() {
        let m = MetricsSnapshot {
            connection_count: 95,
            ..Default::default()
        };
        let recs = recommend(CATALOG, &m, &HashSet::new(), 1);
        assert!(recs[0].reason.contains("95%"));
    }
}
