use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "subscriber_status", rename_all = "snake_case")]
pub enum SubscriberStatus {
    Pending,
    Active,
    Unsubscribed,
}

impl SubscriberStatus {
    pub fn to_str(&self) -> &str {
        match self {
            SubscriberStatus::Pending => "pending",
            SubscriberStatus::Active => "active",
            SubscriberStatus::Unsubscribed => "unsubscribed",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Subscriber {
    pub id: uuid::Uuid,
    pub email: String,
    pub name: Option<String>,
    pub status: SubscriberStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_token: Option<String>,

    /// Assigned exactly once, when the subscriber confirms.
    pub referral_code: Option<String>,

    /// Referrer back-reference, set at signup and never changed afterwards.
    pub referred_by: Option<uuid::Uuid>,

    /// Only the confirmation flow mutates this, via an atomic increment.
    pub referral_count: i32,

    pub subscribed_at: Option<DateTime<Utc>>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Subscriber {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("there")
    }
}

/// Row shape for the admin referral leaderboard.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct TopReferrer {
    pub email: String,
    pub name: Option<String>,
    pub referral_code: Option<String>,
    pub referral_count: i32,
}
