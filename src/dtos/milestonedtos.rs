use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    milestonemodel::{MilestoneAchievementCount, ReferralMilestone, RewardType},
    subscribermodel::TopReferrer,
};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateMilestoneDto {
    #[validate(range(min = 1, message = "Threshold must be a positive integer"))]
    pub threshold: i32,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub description: Option<String>,
    pub reward_type: Option<RewardType>,
    pub reward_value: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateMilestoneDto {
    #[validate(range(min = 1, message = "Threshold must be a positive integer"))]
    pub threshold: Option<i32>,

    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    pub description: Option<String>,
    pub reward_type: Option<RewardType>,
    pub reward_value: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MilestoneData {
    pub milestone: ReferralMilestone,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MilestoneResponseDto {
    pub status: String,
    pub data: MilestoneData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MilestoneListResponseDto {
    pub status: String,
    pub milestones: Vec<ReferralMilestone>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReferralStatsDto {
    pub total_active_subscribers: i64,
    pub total_referred_subscribers: i64,
    pub total_achievements: i64,
    pub top_referrers: Vec<TopReferrer>,
    pub milestone_counts: Vec<MilestoneAchievementCount>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReferralStatsResponseDto {
    pub status: String,
    pub data: ReferralStatsDto,
}

/// Milestone row on the public dashboard, with this subscriber's progress.
#[derive(Debug, Serialize, Deserialize)]
pub struct MilestoneProgressDto {
    pub name: String,
    pub threshold: i32,
    pub description: Option<String>,
    pub reward_type: Option<String>,
    pub achieved: bool,
    pub achieved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReferralDashboardDto {
    pub referral_code: String,
    pub referral_link: String,
    pub referral_count: i32,
    pub milestones: Vec<MilestoneProgressDto>,
    pub next_threshold: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReferralDashboardResponseDto {
    pub status: String,
    pub data: ReferralDashboardDto,
}
