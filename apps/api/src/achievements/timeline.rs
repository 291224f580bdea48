//! Timeline, unlock velocity, and peer comparison views.
//!
//! Benchmarks and percentile thresholds are fixed tables, not computed from
//! a live population.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::achievements::catalog::{self, Rarity, CATALOG};
use crate::models::unlock::UnlockRecord;

#[derive(Debug, Clone, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub codes: Vec<String>,
    pub count: usize,
    pub cumulative: usize,
}

/// Groups unlocks by UTC date, ascending, with a running total.
pub fn build_timeline(records: &[UnlockRecord]) -> Vec<TimelinePoint> {
    let mut by_date: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for r in records {
        by_date
            .entry(r.unlocked_at.date_naive())
            .or_default()
            .push(r.achievement_code.clone());
    }

    let mut cumulative = 0;
    by_date
        .into_iter()
        .map(|(date, codes)| {
            cumulative += codes.len();
            TimelinePoint {
                date,
                count: codes.len(),
                cumulative,
                codes,
            }
        })
        .collect()
}

const WEEKLY_BENCHMARK: usize = 2;
const MONTHLY_BENCHMARK: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    Ahead,
    OnPace,
    Behind,
}

#[derive(Debug, Clone, Serialize)]
pub struct VelocityReport {
    pub last_7_days: usize,
    pub last_30_days: usize,
    pub weekly_benchmark: usize,
    pub monthly_benchmark: usize,
    pub pace: Pace,
}

/// Trailing-window unlock counts against the fixed benchmarks. The better of
/// the two ratios decides the pace label, so a monthly batch of unlocks is
/// not flagged Behind during a quiet week.
pub fn compute_velocity(records: &[UnlockRecord], today: NaiveDate) -> VelocityReport {
    let count_since = |cutoff: NaiveDate| {
        records
            .iter()
            .filter(|r| r.unlocked_at.date_naive() > cutoff)
            .count()
    };
    let last_7_days = count_since(today - Duration::days(7));
    let last_30_days = count_since(today - Duration::days(30));

    let week_ratio = last_7_days as f64 / WEEKLY_BENCHMARK as f64;
    let month_ratio = last_30_days as f64 / MONTHLY_BENCHMARK as f64;
    let ratio = week_ratio.max(month_ratio);

    let pace = if ratio >= 1.5 {
        Pace::Ahead
    } else if ratio >= 0.75 {
        Pace::OnPace
    } else {
        Pace::Behind
    };

    VelocityReport {
        last_7_days,
        last_30_days,
        weekly_benchmark: WEEKLY_BENCHMARK,
        monthly_benchmark: MONTHLY_BENCHMARK,
        pace,
    }
}

/// Unlock-count floors for each percentile label, best first.
const PERCENTILE_THRESHOLDS: &[(usize, &str)] = &[
    (30, "top_1_percent"),
    (20, "top_5_percent"),
    (12, "top_10_percent"),
    (6, "top_25_percent"),
    (3, "top_50_percent"),
];

#[derive(Debug, Clone, Serialize)]
pub struct RarityCount {
    pub rarity: Rarity,
    pub unlocked: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub unlocked: usize,
    pub total: usize,
    pub completion_pct: u8,
    pub percentile: &'static str,
    pub rarity_breakdown: Vec<RarityCount>,
}

pub fn compare(unlocked: &HashSet<String>) -> ComparisonReport {
    let total = CATALOG.len();
    let count = unlocked
        .iter()
        .filter(|code| catalog::find(code).is_some())
        .count();

    let percentile = PERCENTILE_THRESHOLDS
        .iter()
        .find(|(floor, _)| count >= *floor)
        .map(|(_, label)| *label)
        .unwrap_or("starting_out");

    let rarity_breakdown = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary]
        .into_iter()
        .map(|rarity| {
            let of_rarity: Vec<_> = CATALOG.iter().filter(|d| d.rarity == rarity).collect();
            RarityCount {
                rarity,
                unlocked: of_rarity.iter().filter(|d| unlocked.contains(d.code)).count(),
                total: of_rarity.len(),
            }
        })
        .collect();

    ComparisonReport {
        unlocked: count,
        total,
        completion_pct: if total == 0 {
            0
        } else {
            (count as f64 / total as f64 * 100.0).round() as u8
        },
        percentile,
        rarity_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use uuid::Uuid;

    fn record(code: &str, days_ago: i64) -> UnlockRecord {
        let base = Utc.with_ymd_and_hms(2025, 6, 20, 9, 0, 0).unwrap();
        UnlockRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            achievement_code: code.to_string(),
            unlocked_at: base - Duration::days(days_ago),
            metadata: json!({}),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()
    }

    #[test]
    fn test_timeline_ascending_with_cumulative() {
        let records = vec![record("a", 0), record("b", 5), record("c", 5), record("d", 10)];
        let timeline = build_timeline(&records);
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[0].count, 1); // 10 days ago
        assert_eq!(timeline[1].count, 2);
        assert_eq!(timeline[1].cumulative, 3);
        assert_eq!(timeline[2].cumulative, 4);
        assert!(timeline[0].date < timeline[2].date);
    }

    #[test]
    fn test_velocity_windows() {
        let records = vec![record("a", 1), record("b", 3), record("c", 20), record("d", 45)];
        let v = compute_velocity(&records, today());
        assert_eq!(v.last_7_days, 2);
        assert_eq!(v.last_30_days, 3);
    }

    #[test]
    fn test_pace_labels() {
        let ahead: Vec<_> = (0..3).map(|i| record("x", i)).collect();
        assert_eq!(compute_velocity(&ahead, today()).pace, Pace::Ahead);

        let on_pace = vec![record("x", 1), record("y", 2)];
        assert_eq!(compute_velocity(&on_pace, today()).pace, Pace::OnPace);

        assert_eq!(compute_velocity(&[], today()).pace, Pace::Behind);
    }

    #[test]
    fn test_monthly_batch_is_not_behind() {
        // Nothing this week, but six unlocks earlier in the month.
        let records: Vec<_> = (10..16).map(|i| record("x", i)).collect();
        let v = compute_velocity(&records, today());
        assert_eq!(v.last_7_days, 0);
        assert_eq!(v.pace, Pace::OnPace);
    }

    #[test]
    fn test_comparison_percentile_buckets() {
        let none: HashSet<String> = HashSet::new();
        assert_eq!(compare(&none).percentile, "starting_out");

        let three: HashSet<String> = ["first_post", "rising_star", "first_hundred"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(compare(&three).percentile, "top_50_percent");
    }

    #[test]
    fn test_comparison_ignores_codes_missing_from_catalog() {
        let set: HashSet<String> = ["ghost_code".to_string()].into();
        let report = compare(&set);
        assert_eq!(report.unlocked, 0);
    }

    #[test]
    fn test_rarity_breakdown_totals_cover_catalog() {
        let report = compare(&HashSet::new());
        let sum: usize = report.rarity_breakdown.iter().map(|r| r.total).sum();
        assert_eq!(sum, CATALOG.len());
    }
}
