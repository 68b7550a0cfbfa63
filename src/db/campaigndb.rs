use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::campaignmodel::{Campaign, CampaignStatus};

#[async_trait]
pub trait CampaignExt {
    async fn get_campaigns(&self) -> Result<Vec<Campaign>, sqlx::Error>;

    async fn get_campaign(&self, campaign_id: Uuid) -> Result<Option<Campaign>, sqlx::Error>;

    async fn save_campaign(
        &self,
        name: String,
        subject_a: String,
        subject_b: Option<String>,
    ) -> Result<Campaign, sqlx::Error>;

    async fn update_campaign_status(
        &self,
        campaign_id: Uuid,
        status: CampaignStatus,
    ) -> Result<Option<Campaign>, sqlx::Error>;

    /// Records delivery stats for both variants as they come back from the
    /// send; either side may still be unknown.
    async fn update_variant_stats(
        &self,
        campaign_id: Uuid,
        a_open_rate: Option<f64>,
        a_click_rate: Option<f64>,
        b_open_rate: Option<f64>,
        b_click_rate: Option<f64>,
    ) -> Result<Option<Campaign>, sqlx::Error>;

    async fn delete_campaign(&self, campaign_id: Uuid) -> Result<u64, sqlx::Error>;
}

const CAMPAIGN_COLUMNS: &str = r#"
    id, name, subject_a, subject_b, status,
    a_open_rate, a_click_rate, b_open_rate, b_click_rate,
    created_at, updated_at
"#;

#[async_trait]
impl CampaignExt for DBClient {
    async fn get_campaigns(&self) -> Result<Vec<Campaign>, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(&format!(
            r#"
            SELECT {CAMPAIGN_COLUMNS} FROM campaigns
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_campaign(&self, campaign_id: Uuid) -> Result<Option<Campaign>, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1"
        ))
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_campaign(
        &self,
        name: String,
        subject_a: String,
        subject_b: Option<String>,
    ) -> Result<Campaign, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(&format!(
            r#"
            INSERT INTO campaigns (name, subject_a, subject_b)
            VALUES ($1, $2, $3)
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(subject_a)
        .bind(subject_b)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_campaign_status(
        &self,
        campaign_id: Uuid,
        status: CampaignStatus,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(&format!(
            r#"
            UPDATE campaigns
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(campaign_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_variant_stats(
        &self,
        campaign_id: Uuid,
        a_open_rate: Option<f64>,
        a_click_rate: Option<f64>,
        b_open_rate: Option<f64>,
        b_click_rate: Option<f64>,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(&format!(
            r#"
            UPDATE campaigns
            SET a_open_rate = COALESCE($2, a_open_rate),
                a_click_rate = COALESCE($3, a_click_rate),
                b_open_rate = COALESCE($4, b_open_rate),
                b_click_rate = COALESCE($5, b_click_rate),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(campaign_id)
        .bind(a_open_rate)
        .bind(a_click_rate)
        .bind(b_open_rate)
        .bind(b_click_rate)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_campaign(&self, campaign_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(campaign_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
