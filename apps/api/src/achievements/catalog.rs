//! The achievement definition catalog.
//!
//! Definitions are immutable and defined wholesale here; there is no runtime
//! registration path. Codes are the durable keys persisted in unlock records,
//! so renaming one is a data migration, not an edit.

use serde::{Deserialize, Serialize};

use crate::models::metrics::MetricKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BrandScore,
    Engagement,
    ProfileCompletion,
    Consistency,
    ContentCreation,
    Networking,
    Learning,
    ThoughtLeadership,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::BrandScore => "brand_score",
            Category::Engagement => "engagement",
            Category::ProfileCompletion => "profile_completion",
            Category::Consistency => "consistency",
            Category::ContentCreation => "content_creation",
            Category::Networking => "networking",
            Category::Learning => "learning",
            Category::ThoughtLeadership => "thought_leadership",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

/// Unlock criteria, one variant per criteria kind. Targets live inside the
/// variant, so a definition cannot pair a kind with the wrong value shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Criteria {
    ScoreThreshold { threshold: f64 },
    MetricThreshold { metric: MetricKey, threshold: f64 },
    Completeness { threshold: f64 },
    Consistency { days: u32 },
    ContentCount { count: u32 },
    ContentViews { views: u64 },
    ConnectionCount { count: u32 },
    EngagementCount { count: u32 },
    LearningCompletion { count: u32 },
    SkillCount { count: u32 },
    SkillEndorsements { count: u32 },
    ArticleCount { count: u32 },
    MentionCount { count: u32 },
    TotalViews { views: u64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementDefinition {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub icon: &'static str,
    pub rarity: Rarity,
    pub criteria: Criteria,
}

pub const CATALOG: &[AchievementDefinition] = &[
    // Brand score
    AchievementDefinition {
        code: "rising_star",
        name: "Rising Star",
        description: "Reach an overall brand score of 40",
        category: Category::BrandScore,
        icon: "star",
        rarity: Rarity::Common,
        criteria: Criteria::ScoreThreshold { threshold: 40.0 },
    },
    AchievementDefinition {
        code: "brand_builder",
        name: "Brand Builder",
        description: "Reach an overall brand score of 60",
        category: Category::BrandScore,
        icon: "hammer",
        rarity: Rarity::Rare,
        criteria: Criteria::ScoreThreshold { threshold: 60.0 },
    },
    AchievementDefinition {
        code: "brand_authority",
        name: "Brand Authority",
        description: "Reach an overall brand score of 80",
        category: Category::BrandScore,
        icon: "shield",
        rarity: Rarity::Epic,
        criteria: Criteria::ScoreThreshold { threshold: 80.0 },
    },
    AchievementDefinition {
        code: "brand_icon",
        name: "Brand Icon",
        description: "Reach an overall brand score of 95",
        category: Category::BrandScore,
        icon: "crown",
        rarity: Rarity::Legendary,
        criteria: Criteria::ScoreThreshold { threshold: 95.0 },
    },
    // Engagement
    AchievementDefinition {
        code: "first_reactions",
        name: "First Reactions",
        description: "Collect 10 interactions on your content",
        category: Category::Engagement,
        icon: "thumbs-up",
        rarity: Rarity::Common,
        criteria: Criteria::EngagementCount { count: 10 },
    },
    AchievementDefinition {
        code: "conversation_starter",
        name: "Conversation Starter",
        description: "Collect 100 interactions on your content",
        category: Category::Engagement,
        icon: "message-circle",
        rarity: Rarity::Rare,
        criteria: Criteria::EngagementCount { count: 100 },
    },
    AchievementDefinition {
        code: "engagement_magnet",
        name: "Engagement Magnet",
        description: "Sustain an engagement rate of 5%",
        category: Category::Engagement,
        icon: "magnet",
        rarity: Rarity::Epic,
        criteria: Criteria::MetricThreshold {
            metric: MetricKey::EngagementRate,
            threshold: 5.0,
        },
    },
    // Profile completion
    AchievementDefinition {
        code: "profile_polished",
        name: "Profile Polished",
        description: "Bring your profile to 70% complete",
        category: Category::ProfileCompletion,
        icon: "user-check",
        rarity: Rarity::Common,
        criteria: Criteria::Completeness { threshold: 70.0 },
    },
    AchievementDefinition {
        code: "all_star_profile",
        name: "All-Star Profile",
        description: "Complete every section of your profile",
        category: Category::ProfileCompletion,
        icon: "award",
        rarity: Rarity::Rare,
        criteria: Criteria::Completeness { threshold: 100.0 },
    },
    // Consistency
    AchievementDefinition {
        code: "daily_habit",
        name: "Daily Habit",
        description: "Stay active 3 days in a row",
        category: Category::Consistency,
        icon: "calendar",
        rarity: Rarity::Common,
        criteria: Criteria::Consistency { days: 3 },
    },
    AchievementDefinition {
        code: "week_of_wins",
        name: "Week of Wins",
        description: "Stay active 7 days in a row",
        category: Category::Consistency,
        icon: "calendar-check",
        rarity: Rarity::Rare,
        criteria: Criteria::Consistency { days: 7 },
    },
    AchievementDefinition {
        code: "unstoppable",
        name: "Unstoppable",
        description: "Stay active 30 days in a row",
        category: Category::Consistency,
        icon: "flame",
        rarity: Rarity::Legendary,
        criteria: Criteria::Consistency { days: 30 },
    },
    // Content creation
    AchievementDefinition {
        code: "first_post",
        name: "First Post",
        description: "Publish your first piece of content",
        category: Category::ContentCreation,
        icon: "edit",
        rarity: Rarity::Common,
        criteria: Criteria::ContentCount { count: 1 },
    },
    AchievementDefinition {
        code: "content_machine",
        name: "Content Machine",
        description: "Publish 50 pieces of content",
        category: Category::ContentCreation,
        icon: "layers",
        rarity: Rarity::Rare,
        criteria: Criteria::ContentCount { count: 50 },
    },
    AchievementDefinition {
        code: "viral_moment",
        name: "Viral Moment",
        description: "Get 10,000 views on your content",
        category: Category::ContentCreation,
        icon: "trending-up",
        rarity: Rarity::Epic,
        criteria: Criteria::ContentViews { views: 10_000 },
    },
    AchievementDefinition {
        code: "audience_of_thousands",
        name: "Audience of Thousands",
        description: "Accumulate 100,000 total views",
        category: Category::ContentCreation,
        icon: "users",
        rarity: Rarity::Epic,
        criteria: Criteria::TotalViews { views: 100_000 },
    },
    // Networking
    AchievementDefinition {
        code: "first_hundred",
        name: "First Hundred",
        description: "Grow your network to 100 connections",
        category: Category::Networking,
        icon: "link",
        rarity: Rarity::Common,
        criteria: Criteria::ConnectionCount { count: 100 },
    },
    AchievementDefinition {
        code: "super_connector",
        name: "Super Connector",
        description: "Grow your network to 500 connections",
        category: Category::Networking,
        icon: "share-2",
        rarity: Rarity::Rare,
        criteria: Criteria::ConnectionCount { count: 500 },
    },
    AchievementDefinition {
        code: "networking_elite",
        name: "Networking Elite",
        description: "Grow your network to 1,000 connections",
        category: Category::Networking,
        icon: "globe",
        rarity: Rarity::Epic,
        criteria: Criteria::ConnectionCount { count: 1000 },
    },
    // Learning
    AchievementDefinition {
        code: "lifelong_learner",
        name: "Lifelong Learner",
        description: "Complete your first course",
        category: Category::Learning,
        icon: "book-open",
        rarity: Rarity::Common,
        criteria: Criteria::LearningCompletion { count: 1 },
    },
    AchievementDefinition {
        code: "course_collector",
        name: "Course Collector",
        description: "Complete 10 courses",
        category: Category::Learning,
        icon: "bookmark",
        rarity: Rarity::Rare,
        criteria: Criteria::LearningCompletion { count: 10 },
    },
    AchievementDefinition {
        code: "skill_stack",
        name: "Skill Stack",
        description: "List 15 skills on your profile",
        category: Category::Learning,
        icon: "grid",
        rarity: Rarity::Common,
        criteria: Criteria::SkillCount { count: 15 },
    },
    AchievementDefinition {
        code: "endorsed_expert",
        name: "Endorsed Expert",
        description: "Receive 50 skill endorsements",
        category: Category::Learning,
        icon: "check-circle",
        rarity: Rarity::Rare,
        criteria: Criteria::SkillEndorsements { count: 50 },
    },
    // Thought leadership
    AchievementDefinition {
        code: "first_article",
        name: "First Article",
        description: "Publish your first long-form article",
        category: Category::ThoughtLeadership,
        icon: "file-text",
        rarity: Rarity::Common,
        criteria: Criteria::ArticleCount { count: 1 },
    },
    AchievementDefinition {
        code: "published_voice",
        name: "Published Voice",
        description: "Publish 10 long-form articles",
        category: Category::ThoughtLeadership,
        icon: "feather",
        rarity: Rarity::Rare,
        criteria: Criteria::ArticleCount { count: 10 },
    },
    AchievementDefinition {
        code: "industry_mention",
        name: "Industry Mention",
        description: "Get mentioned somewhere on the public web",
        category: Category::ThoughtLeadership,
        icon: "radio",
        rarity: Rarity::Common,
        criteria: Criteria::MentionCount { count: 1 },
    },
    AchievementDefinition {
        code: "talk_of_the_town",
        name: "Talk of the Town",
        description: "Get mentioned 5 times on the public web",
        category: Category::ThoughtLeadership,
        icon: "megaphone",
        rarity: Rarity::Epic,
        criteria: Criteria::MentionCount { count: 5 },
    },
];

/// Looks up a definition by its durable code.
pub fn find(code: &str) -> Option<&'static AchievementDefinition> {
    CATALOG.iter().find(|d| d.code == code)
}
