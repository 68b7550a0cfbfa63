use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::milestonemodel::{
    MilestoneAchievementCount, ReferralAchievement, ReferralMilestone, RewardType,
};

#[async_trait]
pub trait MilestoneExt {
    async fn get_milestones(&self) -> Result<Vec<ReferralMilestone>, sqlx::Error>;

    async fn get_milestone(
        &self,
        milestone_id: Uuid,
    ) -> Result<Option<ReferralMilestone>, sqlx::Error>;

    async fn get_milestone_by_threshold(
        &self,
        threshold: i32,
    ) -> Result<Option<ReferralMilestone>, sqlx::Error>;

    async fn save_milestone(
        &self,
        threshold: i32,
        name: String,
        description: Option<String>,
        reward_type: Option<RewardType>,
        reward_value: Option<String>,
    ) -> Result<ReferralMilestone, sqlx::Error>;

    async fn update_milestone(
        &self,
        milestone_id: Uuid,
        threshold: Option<i32>,
        name: Option<String>,
        description: Option<String>,
        reward_type: Option<RewardType>,
        reward_value: Option<String>,
    ) -> Result<Option<ReferralMilestone>, sqlx::Error>;

    async fn delete_milestone(&self, milestone_id: Uuid) -> Result<u64, sqlx::Error>;

    /// Every milestone the given count has reached, ascending by threshold.
    async fn milestones_reached(&self, count: i32)
        -> Result<Vec<ReferralMilestone>, sqlx::Error>;

    /// Insert-or-ignore on the (subscriber, milestone) unique constraint.
    /// Ok(true) means the row was newly created; Ok(false) means the
    /// achievement already existed. This signal is what keeps repeat
    /// confirmations and concurrent increments from re-notifying.
    async fn record_achievement(
        &self,
        subscriber_id: Uuid,
        milestone_id: Uuid,
    ) -> Result<bool, sqlx::Error>;

    async fn get_achievements_for(
        &self,
        subscriber_id: Uuid,
    ) -> Result<Vec<ReferralAchievement>, sqlx::Error>;

    async fn count_achievements(&self) -> Result<i64, sqlx::Error>;

    async fn achievement_counts_per_milestone(
        &self,
    ) -> Result<Vec<MilestoneAchievementCount>, sqlx::Error>;
}

const MILESTONE_COLUMNS: &str = r#"
    id, threshold, name, description, reward_type, reward_value,
    created_at, updated_at
"#;

#[async_trait]
impl MilestoneExt for DBClient {
    async fn get_milestones(&self) -> Result<Vec<ReferralMilestone>, sqlx::Error> {
        sqlx::query_as::<_, ReferralMilestone>(&format!(
            r#"
            SELECT {MILESTONE_COLUMNS} FROM referral_milestones
            ORDER BY threshold ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_milestone(
        &self,
        milestone_id: Uuid,
    ) -> Result<Option<ReferralMilestone>, sqlx::Error> {
        sqlx::query_as::<_, ReferralMilestone>(&format!(
            "SELECT {MILESTONE_COLUMNS} FROM referral_milestones WHERE id = $1"
        ))
        .bind(milestone_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_milestone_by_threshold(
        &self,
        threshold: i32,
    ) -> Result<Option<ReferralMilestone>, sqlx::Error> {
        sqlx::query_as::<_, ReferralMilestone>(&format!(
            "SELECT {MILESTONE_COLUMNS} FROM referral_milestones WHERE threshold = $1"
        ))
        .bind(threshold)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_milestone(
        &self,
        threshold: i32,
        name: String,
        description: Option<String>,
        reward_type: Option<RewardType>,
        reward_value: Option<String>,
    ) -> Result<ReferralMilestone, sqlx::Error> {
        sqlx::query_as::<_, ReferralMilestone>(&format!(
            r#"
            INSERT INTO referral_milestones (threshold, name, description, reward_type, reward_value)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MILESTONE_COLUMNS}
            "#
        ))
        .bind(threshold)
        .bind(name)
        .bind(description)
        .bind(reward_type)
        .bind(reward_value)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_milestone(
        &self,
        milestone_id: Uuid,
        threshold: Option<i32>,
        name: Option<String>,
        description: Option<String>,
        reward_type: Option<RewardType>,
        reward_value: Option<String>,
    ) -> Result<Option<ReferralMilestone>, sqlx::Error> {
        sqlx::query_as::<_, ReferralMilestone>(&format!(
            r#"
            UPDATE referral_milestones
            SET threshold = COALESCE($2, threshold),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                reward_type = COALESCE($5, reward_type),
                reward_value = COALESCE($6, reward_value),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {MILESTONE_COLUMNS}
            "#
        ))
        .bind(milestone_id)
        .bind(threshold)
        .bind(name)
        .bind(description)
        .bind(reward_type)
        .bind(reward_value)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_milestone(&self, milestone_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM referral_milestones WHERE id = $1")
            .bind(milestone_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn milestones_reached(
        &self,
        count: i32,
    ) -> Result<Vec<ReferralMilestone>, sqlx::Error> {
        sqlx::query_as::<_, ReferralMilestone>(&format!(
            r#"
            SELECT {MILESTONE_COLUMNS} FROM referral_milestones
            WHERE threshold <= $1
            ORDER BY threshold ASC
            "#
        ))
        .bind(count)
        .fetch_all(&self.pool)
        .await
    }

    async fn record_achievement(
        &self,
        subscriber_id: Uuid,
        milestone_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO referral_achievements (subscriber_id, milestone_id)
            VALUES ($1, $2)
            ON CONFLICT (subscriber_id, milestone_id) DO NOTHING
            "#,
        )
        .bind(subscriber_id)
        .bind(milestone_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get_achievements_for(
        &self,
        subscriber_id: Uuid,
    ) -> Result<Vec<ReferralAchievement>, sqlx::Error> {
        sqlx::query_as::<_, ReferralAchievement>(
            r#"
            SELECT id, subscriber_id, milestone_id, achieved_at
            FROM referral_achievements
            WHERE subscriber_id = $1
            ORDER BY achieved_at ASC
            "#,
        )
        .bind(subscriber_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_achievements(&self) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM referral_achievements"#)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn achievement_counts_per_milestone(
        &self,
    ) -> Result<Vec<MilestoneAchievementCount>, sqlx::Error> {
        sqlx::query_as::<_, MilestoneAchievementCount>(
            r#"
            SELECT m.id as milestone_id, m.name, m.threshold, COUNT(a.id) as achievements
            FROM referral_milestones m
            LEFT JOIN referral_achievements a ON a.milestone_id = m.id
            GROUP BY m.id, m.name, m.threshold
            ORDER BY m.threshold ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
