use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ContactList {
    pub id: uuid::Uuid,
    pub name: String,
    pub description: Option<String>,

    /// Confirmed subscribers are added to auto-assign lists automatically.
    pub auto_assign: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ListMember {
    pub id: uuid::Uuid,
    pub list_id: uuid::Uuid,
    pub subscriber_id: uuid::Uuid,
    pub added_at: DateTime<Utc>,
}

/// List row joined with its member count for the admin overview.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ContactListWithCount {
    pub id: uuid::Uuid,
    pub name: String,
    pub description: Option<String>,
    pub auto_assign: bool,
    pub member_count: i64,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
