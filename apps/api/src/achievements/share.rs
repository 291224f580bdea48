//! Share-card templating for unlocked achievements.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::achievements::catalog::{AchievementDefinition, Rarity};
use crate::achievements::timeline::ComparisonReport;

#[derive(Debug, Clone, Serialize)]
pub struct ShareCard {
    pub code: &'static str,
    pub name: &'static str,
    pub rarity: Rarity,
    pub category: &'static str,
    pub headline: String,
    pub body: String,
    pub hashtags: Vec<&'static str>,
}

pub fn build_share_card(def: &'static AchievementDefinition, unlocked_at: DateTime<Utc>) -> ShareCard {
    let rarity_phrase = match def.rarity {
        Rarity::Common => "",
        Rarity::Rare => "rare ",
        Rarity::Epic => "epic ",
        Rarity::Legendary => "legendary ",
    };
    ShareCard {
        code: def.code,
        name: def.name,
        rarity: def.rarity,
        category: def.category.as_str(),
        headline: format!("I just earned the {rarity_phrase}\"{}\" badge!", def.name),
        body: format!(
            "{} ({}). Unlocked {}.",
            def.description,
            def.rarity.as_str(),
            unlocked_at.format("%B %-d, %Y")
        ),
        hashtags: vec!["PersonalBrand", "Milestone"],
    }
}

/// A one-line profile summary suitable for a social post.
pub fn build_summary_line(report: &ComparisonReport) -> String {
    let rarest = report
        .rarity_breakdown
        .iter()
        .rev()
        .find(|r| r.unlocked > 0)
        .map(|r| r.rarity.as_str());

    match rarest {
        Some(tier) if report.unlocked > 0 => format!(
            "{} of {} brand achievements earned ({}% complete), including {} tier.",
            report.unlocked, report.total, report.completion_pct, tier
        ),
        _ => "Just getting started on my personal-brand journey.".to_string(),
    }
}
