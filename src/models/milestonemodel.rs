use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "reward_type", rename_all = "snake_case")]
pub enum RewardType {
    Badge,
    Discount,
    Content,
    Custom,
}

impl RewardType {
    pub fn to_str(&self) -> &str {
        match self {
            RewardType::Badge => "badge",
            RewardType::Discount => "discount",
            RewardType::Content => "content",
            RewardType::Custom => "custom",
        }
    }
}

/// Admin-configured referral-count threshold with an associated reward.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ReferralMilestone {
    pub id: uuid::Uuid,

    /// Globally unique, always >= 1.
    pub threshold: i32,

    pub name: String,
    pub description: Option<String>,
    pub reward_type: Option<RewardType>,
    pub reward_value: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// One-time crossing of a milestone by a specific subscriber.
/// (subscriber_id, milestone_id) is unique; inserts use ON CONFLICT DO NOTHING.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ReferralAchievement {
    pub id: uuid::Uuid,
    pub subscriber_id: uuid::Uuid,
    pub milestone_id: uuid::Uuid,
    pub achieved_at: DateTime<Utc>,
}

/// Aggregate row for the admin stats endpoint.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct MilestoneAchievementCount {
    pub milestone_id: uuid::Uuid,
    pub name: String,
    pub threshold: i32,
    pub achievements: i64,
}
