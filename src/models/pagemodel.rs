use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct SignupPage {
    pub id: uuid::Uuid,

    /// Unique URL fragment the public page is served under.
    pub slug: String,

    pub title: String,
    pub description: Option<String>,

    /// List new signups from this page join, if any.
    pub list_id: Option<uuid::Uuid>,

    pub published: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
