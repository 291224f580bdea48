//! Notification payload builders. Pure: the caller (or a frontend) decides
//! how to deliver them; a skipped notification is never an error.

use serde::Serialize;

use crate::achievements::catalog::{AchievementDefinition, Rarity};
use crate::achievements::criteria::EvaluatedAchievement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Unlocked,
    NearUnlock,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub code: &'static str,
    pub title: String,
    pub message: String,
    pub icon: &'static str,
    pub rarity: Rarity,
}

pub fn unlock_notification(def: &'static AchievementDefinition) -> Notification {
    let flourish = match def.rarity {
        Rarity::Common => "Achievement unlocked!",
        Rarity::Rare => "Rare achievement unlocked!",
        Rarity::Epic => "Epic achievement unlocked!",
        Rarity::Legendary => "Legendary! This one is earned by very few.",
    };
    Notification {
        kind: NotificationKind::Unlocked,
        code: def.code,
        title: format!("{flourish} {}", def.name),
        message: def.description.to_string(),
        icon: def.icon,
        rarity: def.rarity,
    }
}

const NEAR_UNLOCK_FLOOR: u8 = 80;

/// Nudges for locked achievements at 80%+ progress.
pub fn near_unlock_nudges(evaluated: &[EvaluatedAchievement]) -> Vec<Notification> {
    evaluated
        .iter()
        .filter(|e| !e.already_unlocked && !e.eligible && e.progress >= NEAR_UNLOCK_FLOOR)
        .map(|e| Notification {
            kind: NotificationKind::NearUnlock,
            code: e.code,
            title: format!("Almost there: {}", e.name),
            message: format!("You are {}% of the way to {}.", e.progress, e.name),
            icon: e.icon,
            rarity: e.rarity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::catalog::{self, Category};

    fn evaluated(progress: u8, eligible: bool, already_unlocked: bool) -> EvaluatedAchievement {
        EvaluatedAchievement {
            code: "first_hundred",
            name: "First Hundred",
            category: Category::Networking,
            rarity: Rarity::Common,
            icon: "link",
            eligible,
            progress,
            already_unlocked,
        }
    }

    #[test]
    fn test_unlock_notification_carries_definition_fields() {
        let def = catalog::find("brand_icon").unwrap();
        let n = unlock_notification(def);
        assert_eq!(n.kind, NotificationKind::Unlocked);
        assert!(n.title.contains("Brand Icon"));
        assert!(n.title.contains("Legendary"));
        assert_eq!(n.rarity, Rarity::Legendary);
    }

    #[test]
    fn test_nudge_only_above_floor() {
        let list = vec![evaluated(79, false, false), evaluated(80, false, false)];
        let nudges = near_unlock_nudges(&list);
        assert_eq!(nudges.len(), 1);
        assert!(nudges[0].message.contains("80%"));
    }

    #[test]
    fn test_no_nudge_for_eligible_or_unlocked() {
        let list = vec![evaluated(100, true, false), evaluated(95, false, true)];
        assert!(near_unlock_nudges(&list).is_empty());
    }
}
