use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::campaignmodel::Campaign;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateCampaignDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Subject line A is required"))]
    pub subject_a: String,

    /// Providing a second subject line enables A/B testing.
    #[validate(length(min = 1, message = "Subject line B cannot be empty"))]
    pub subject_b: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateVariantStatsDto {
    #[validate(range(min = 0.0, max = 1.0, message = "Rates must be between 0 and 1"))]
    pub a_open_rate: Option<f64>,

    #[validate(range(min = 0.0, max = 1.0, message = "Rates must be between 0 and 1"))]
    pub a_click_rate: Option<f64>,

    #[validate(range(min = 0.0, max = 1.0, message = "Rates must be between 0 and 1"))]
    pub b_open_rate: Option<f64>,

    #[validate(range(min = 0.0, max = 1.0, message = "Rates must be between 0 and 1"))]
    pub b_click_rate: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignData {
    pub campaign: Campaign,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignResponseDto {
    pub status: String,
    pub data: CampaignData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignListResponseDto {
    pub status: String,
    pub campaigns: Vec<Campaign>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AbTestDto {
    /// Share of the audience the test send should go to right now.
    pub test_ratio: f64,
    pub active_subscribers: i64,
    /// None until both variants have recorded stats.
    pub winner: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AbTestResponseDto {
    pub status: String,
    pub data: AbTestDto,
}
