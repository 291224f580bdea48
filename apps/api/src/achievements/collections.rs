//! Static achievement collections and ordered paths.
//!
//! A collection is an unordered badge set; a path is a sequence with a
//! suggested next step. Progress for both is pure set arithmetic over the
//! unlocked-code set.

use std::collections::HashSet;

use serde::Serialize;

use crate::achievements::catalog;

pub struct CollectionDef {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub codes: &'static [&'static str],
}

pub struct PathDef {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub steps: &'static [&'static str],
}

pub const COLLECTIONS: &[CollectionDef] = &[
    CollectionDef {
        key: "getting_started",
        name: "Getting Started",
        description: "The first wins on every new profile",
        codes: &["profile_polished", "first_post", "first_hundred", "rising_star"],
    },
    CollectionDef {
        key: "content_creator",
        name: "Content Creator",
        description: "From first post to a real audience",
        codes: &[
            "first_post",
            "content_machine",
            "viral_moment",
            "audience_of_thousands",
        ],
    },
    CollectionDef {
        key: "networker",
        name: "Networker",
        description: "Building the connection graph",
        codes: &["first_hundred", "super_connector", "networking_elite"],
    },
    CollectionDef {
        key: "scholar",
        name: "Scholar",
        description: "Courses, skills, and endorsements",
        codes: &[
            "lifelong_learner",
            "course_collector",
            "skill_stack",
            "endorsed_expert",
        ],
    },
    CollectionDef {
        key: "thought_leader",
        name: "Thought Leader",
        description: "Articles and public mentions",
        codes: &[
            "first_article",
            "published_voice",
            "industry_mention",
            "talk_of_the_town",
        ],
    },
    CollectionDef {
        key: "brand_legend",
        name: "Brand Legend",
        description: "The rarest milestones on the platform",
        codes: &["brand_authority", "brand_icon", "unstoppable"],
    },
];

pub const PATHS: &[PathDef] = &[
    PathDef {
        key: "visibility",
        name: "Visibility Path",
        description: "Get seen: polish, post, connect, score",
        steps: &["profile_polished", "first_post", "first_hundred", "rising_star"],
    },
    PathDef {
        key: "authority",
        name: "Authority Path",
        description: "Become a reference in your field",
        steps: &[
            "first_article",
            "published_voice",
            "talk_of_the_town",
            "brand_authority",
        ],
    },
    PathDef {
        key: "momentum",
        name: "Momentum Path",
        description: "Show up every day",
        steps: &["daily_habit", "week_of_wins", "unstoppable"],
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct CollectionProgress {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub unlocked: usize,
    pub total: usize,
    pub progress: u8,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathStep {
    pub code: &'static str,
    pub name: &'static str,
    pub unlocked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathProgress {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub steps: Vec<PathStep>,
    pub unlocked: usize,
    pub total: usize,
    pub progress: u8,
    pub completed: bool,
    pub next_step: Option<&'static str>,
}

fn group_progress(codes: &[&'static str], unlocked: &HashSet<String>) -> (usize, usize, u8, bool) {
    let total = codes.len();
    let hit = codes.iter().filter(|c| unlocked.contains(**c)).count();
    let pct = if total == 0 {
        0
    } else {
        (hit as f64 / total as f64 * 100.0).round() as u8
    };
    // An empty group is never complete.
    (hit, total, pct, total > 0 && hit == total)
}

pub fn collection_progress(unlocked: &HashSet<String>) -> Vec<CollectionProgress> {
    COLLECTIONS
        .iter()
        .map(|c| {
            let (hit, total, progress, completed) = group_progress(c.codes, unlocked);
            CollectionProgress {
                key: c.key,
                name: c.name,
                description: c.description,
                unlocked: hit,
                total,
                progress,
                completed,
            }
        })
        .collect()
}

pub fn path_progress(unlocked: &HashSet<String>) -> Vec<PathProgress> {
    PATHS
        .iter()
        .map(|p| {
            let (hit, total, progress, completed) = group_progress(p.steps, unlocked);
            let steps: Vec<PathStep> = p
                .steps
                .iter()
                .map(|code| PathStep {
                    code,
                    name: catalog::find(code).map(|d| d.name).unwrap_or(code),
                    unlocked: unlocked.contains(*code),
                })
                .collect();
            let next_step = steps.iter().find(|s| !s.unlocked).map(|s| s.code);
            PathProgress {
                key: p.key,
                name: p.name,
                description: p.description,
                steps,
                unlocked: hit,
                total,
                progress,
                completed,
                next_step,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlocked(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_every_grouped_code_exists_in_catalog() {
        for c in COLLECTIONS {
            for code in c.codes {
                assert!(catalog::find(code).is_some(), "{} references unknown {code}", c.key);
            }
        }
        for p in PATHS {
            for code in p.steps {
                assert!(catalog::find(code).is_some(), "{} references unknown {code}", p.key);
            }
        }
    }

    #[test]
    fn test_two_of_three_rounds_to_67() {
        let set = unlocked(&["first_hundred", "super_connector"]);
        let networker = collection_progress(&set)
            .into_iter()
            .find(|c| c.key == "networker")
            .unwrap();
        assert_eq!(networker.unlocked, 2);
        assert_eq!(networker.total, 3);
        assert_eq!(networker.progress, 67);
        assert!(!networker.completed);
    }

    #[test]
    fn test_full_collection_completes() {
        let set = unlocked(&["first_hundred", "super_connector", "networking_elite"]);
        let networker = collection_progress(&set)
            .into_iter()
            .find(|c| c.key == "networker")
            .unwrap();
        assert_eq!(networker.progress, 100);
        assert!(networker.completed);
    }

    #[test]
    fn test_path_next_step_is_first_locked() {
        let set = unlocked(&["profile_polished", "first_post"]);
        let visibility = path_progress(&set)
            .into_iter()
            .find(|p| p.key == "visibility")
            .unwrap();
        assert_eq!(visibility.next_step, Some("first_hundred"));
        assert_eq!(visibility.unlocked, 2);
        assert!(!visibility.completed);
    }

    #[test]
    fn test_completed_path_has_no_next_step() {
        let set = unlocked(&["daily_habit", "week_of_wins", "unstoppable"]);
        let momentum = path_progress(&set)
            .into_iter()
            .find(|p| p.key == "momentum")
            .unwrap();
        assert_eq!(momentum.next_step, None);
        assert!(momentum.completed);
    }

    #[test]
    fn test_empty_unlocked_set() {
        let set = HashSet::new();
        for c in collection_progress(&set) {
            assert_eq!(c.progress, 0);
            assert!(!c.completed);
        }
    }
}
