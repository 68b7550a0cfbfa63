use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::subscribermodel::{Subscriber, TopReferrer};

#[async_trait]
pub trait SubscriberExt {
    async fn get_subscriber(
        &self,
        subscriber_id: Option<Uuid>,
        email: Option<&str>,
        confirmation_token: Option<&str>,
        referral_code: Option<&str>,
    ) -> Result<Option<Subscriber>, sqlx::Error>;

    async fn get_subscribers(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Subscriber>, sqlx::Error>;

    async fn save_subscriber<T: Into<String> + Send>(
        &self,
        email: T,
        name: Option<String>,
        confirmation_token: T,
        referred_by: Option<Uuid>,
    ) -> Result<Subscriber, sqlx::Error>;

    /// Flips pending -> active, stamps subscribed_at and assigns the referral
    /// code in one guarded statement. Returns None when the subscriber was not
    /// pending anymore, so a concurrent confirmation loses cleanly.
    async fn confirm_subscriber(
        &self,
        subscriber_id: Uuid,
        referral_code: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error>;

    /// Atomic increment; returns the new count so milestone evaluation never
    /// reads a stale value under concurrent confirmations.
    async fn increment_referral_count(&self, subscriber_id: Uuid) -> Result<i32, sqlx::Error>;

    async fn mark_unsubscribed(
        &self,
        confirmation_token: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error>;

    async fn count_active_subscribers(&self) -> Result<i64, sqlx::Error>;

    async fn count_referred_active(&self) -> Result<i64, sqlx::Error>;

    async fn top_referrers(&self, limit: i64) -> Result<Vec<TopReferrer>, sqlx::Error>;
}

const SUBSCRIBER_COLUMNS: &str = r#"
    id, email, name, status, confirmation_token,
    referral_code, referred_by, referral_count, subscribed_at,
    created_at, updated_at
"#;

#[async_trait]
impl SubscriberExt for DBClient {
    async fn get_subscriber(
        &self,
        subscriber_id: Option<Uuid>,
        email: Option<&str>,
        confirmation_token: Option<&str>,
        referral_code: Option<&str>,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let mut subscriber: Option<Subscriber> = None;

        if let Some(subscriber_id) = subscriber_id {
            subscriber = sqlx::query_as::<_, Subscriber>(&format!(
                "SELECT {SUBSCRIBER_COLUMNS} FROM subscribers WHERE id = $1"
            ))
            .bind(subscriber_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            subscriber = sqlx::query_as::<_, Subscriber>(&format!(
                "SELECT {SUBSCRIBER_COLUMNS} FROM subscribers WHERE email = $1"
            ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(token) = confirmation_token {
            subscriber = sqlx::query_as::<_, Subscriber>(&format!(
                "SELECT {SUBSCRIBER_COLUMNS} FROM subscribers WHERE confirmation_token = $1"
            ))
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(code) = referral_code {
            subscriber = sqlx::query_as::<_, Subscriber>(&format!(
                "SELECT {SUBSCRIBER_COLUMNS} FROM subscribers WHERE referral_code = $1"
            ))
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(subscriber)
    }

    async fn get_subscribers(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Subscriber>, sqlx::Error> {
        let offset = (page - 1) * limit as u32;

        sqlx::query_as::<_, Subscriber>(&format!(
            r#"
            SELECT {SUBSCRIBER_COLUMNS} FROM subscribers
            ORDER BY created_at DESC LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
    }

    async fn save_subscriber<T: Into<String> + Send>(
        &self,
        email: T,
        name: Option<String>,
        confirmation_token: T,
        referred_by: Option<Uuid>,
    ) -> Result<Subscriber, sqlx::Error> {
        sqlx::query_as::<_, Subscriber>(&format!(
            r#"
            INSERT INTO subscribers (email, name, confirmation_token, referred_by)
            VALUES ($1, $2, $3, $4)
            RETURNING {SUBSCRIBER_COLUMNS}
            "#
        ))
        .bind(email.into())
        .bind(name)
        .bind(confirmation_token.into())
        .bind(referred_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn confirm_subscriber(
        &self,
        subscriber_id: Uuid,
        referral_code: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        sqlx::query_as::<_, Subscriber>(&format!(
            r#"
            UPDATE subscribers
            SET status = 'active'::subscriber_status,
                subscribed_at = NOW(),
                referral_code = $2,
                updated_at = NOW()
            WHERE id = $1 AND status = 'pending'::subscriber_status
            RETURNING {SUBSCRIBER_COLUMNS}
            "#
        ))
        .bind(subscriber_id)
        .bind(referral_code)
        .fetch_optional(&self.pool)
        .await
    }

    async fn increment_referral_count(&self, subscriber_id: Uuid) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            UPDATE subscribers
            SET referral_count = referral_count + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING referral_count
            "#,
        )
        .bind(subscriber_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn mark_unsubscribed(
        &self,
        confirmation_token: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        sqlx::query_as::<_, Subscriber>(&format!(
            r#"
            UPDATE subscribers
            SET status = 'unsubscribed'::subscriber_status, updated_at = NOW()
            WHERE confirmation_token = $1
            RETURNING {SUBSCRIBER_COLUMNS}
            "#
        ))
        .bind(confirmation_token)
        .fetch_optional(&self.pool)
        .await
    }

    async fn count_active_subscribers(&self) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM subscribers WHERE status = 'active'::subscriber_status"#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_referred_active(&self) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM subscribers
            WHERE status = 'active'::subscriber_status AND referred_by IS NOT NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn top_referrers(&self, limit: i64) -> Result<Vec<TopReferrer>, sqlx::Error> {
        sqlx::query_as::<_, TopReferrer>(
            r#"
            SELECT email, name, referral_code, referral_count
            FROM subscribers
            WHERE referral_count > 0
            ORDER BY referral_count DESC, email ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}
