use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "campaign_status", rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Sending,
    Sent,
}

impl CampaignStatus {
    pub fn to_str(&self) -> &str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Sending => "sending",
            CampaignStatus::Sent => "sent",
        }
    }
}

/// A/B testing is enabled iff subject_b is present. Variant rates stay NULL
/// until delivery stats come back from the send.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Campaign {
    pub id: uuid::Uuid,
    pub name: String,
    pub subject_a: String,
    pub subject_b: Option<String>,
    pub status: CampaignStatus,

    pub a_open_rate: Option<f64>,
    pub a_click_rate: Option<f64>,
    pub b_open_rate: Option<f64>,
    pub b_click_rate: Option<f64>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    pub fn variant_a_stats(&self) -> Option<VariantStats> {
        Some(VariantStats {
            open_rate: self.a_open_rate?,
            click_rate: self.a_click_rate?,
        })
    }

    pub fn variant_b_stats(&self) -> Option<VariantStats> {
        Some(VariantStats {
            open_rate: self.b_open_rate?,
            click_rate: self.b_click_rate?,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct VariantStats {
    pub open_rate: f64,
    pub click_rate: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    A,
    B,
}

impl Variant {
    pub fn to_str(&self) -> &str {
        match self {
            Variant::A => "A",
            Variant::B => "B",
        }
    }
}
