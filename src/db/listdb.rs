use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::{
    listmodel::{ContactList, ContactListWithCount},
    subscribermodel::Subscriber,
};

#[async_trait]
pub trait ContactListExt {
    async fn get_lists(&self) -> Result<Vec<ContactListWithCount>, sqlx::Error>;

    async fn get_list(&self, list_id: Uuid) -> Result<Option<ContactList>, sqlx::Error>;

    async fn save_list(
        &self,
        name: String,
        description: Option<String>,
        auto_assign: bool,
    ) -> Result<ContactList, sqlx::Error>;

    async fn update_list(
        &self,
        list_id: Uuid,
        name: Option<String>,
        description: Option<String>,
        auto_assign: Option<bool>,
    ) -> Result<Option<ContactList>, sqlx::Error>;

    async fn delete_list(&self, list_id: Uuid) -> Result<u64, sqlx::Error>;

    /// Insert-or-ignore membership; Ok(true) when the member was added.
    async fn add_list_member(
        &self,
        list_id: Uuid,
        subscriber_id: Uuid,
    ) -> Result<bool, sqlx::Error>;

    async fn get_list_members(
        &self,
        list_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Subscriber>, sqlx::Error>;

    /// Adds the subscriber to every auto-assign list, skipping existing
    /// memberships. Returns how many were added.
    async fn auto_assign_lists(&self, subscriber_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl ContactListExt for DBClient {
    async fn get_lists(&self) -> Result<Vec<ContactListWithCount>, sqlx::Error> {
        sqlx::query_as::<_, ContactListWithCount>(
            r#"
            SELECT l.id, l.name, l.description, l.auto_assign,
                   COUNT(m.id) as member_count,
                   l.created_at, l.updated_at
            FROM contact_lists l
            LEFT JOIN list_members m ON m.list_id = l.id
            GROUP BY l.id
            ORDER BY l.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_list(&self, list_id: Uuid) -> Result<Option<ContactList>, sqlx::Error> {
        sqlx::query_as::<_, ContactList>(
            r#"
            SELECT id, name, description, auto_assign, created_at, updated_at
            FROM contact_lists
            WHERE id = $1
            "#,
        )
        .bind(list_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_list(
        &self,
        name: String,
        description: Option<String>,
        auto_assign: bool,
    ) -> Result<ContactList, sqlx::Error> {
        sqlx::query_as::<_, ContactList>(
            r#"
            INSERT INTO contact_lists (name, description, auto_assign)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, auto_assign, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(auto_assign)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_list(
        &self,
        list_id: Uuid,
        name: Option<String>,
        description: Option<String>,
        auto_assign: Option<bool>,
    ) -> Result<Option<ContactList>, sqlx::Error> {
        sqlx::query_as::<_, ContactList>(
            r#"
            UPDATE contact_lists
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                auto_assign = COALESCE($4, auto_assign),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, auto_assign, created_at, updated_at
            "#,
        )
        .bind(list_id)
        .bind(name)
        .bind(description)
        .bind(auto_assign)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_list(&self, list_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_lists WHERE id = $1")
            .bind(list_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn add_list_member(
        &self,
        list_id: Uuid,
        subscriber_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO list_members (list_id, subscriber_id)
            VALUES ($1, $2)
            ON CONFLICT (list_id, subscriber_id) DO NOTHING
            "#,
        )
        .bind(list_id)
        .bind(subscriber_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get_list_members(
        &self,
        list_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Subscriber>, sqlx::Error> {
        let offset = (page - 1) * limit as u32;

        sqlx::query_as::<_, Subscriber>(
            r#"
            SELECT s.id, s.email, s.name, s.status, s.confirmation_token,
                   s.referral_code, s.referred_by, s.referral_count, s.subscribed_at,
                   s.created_at, s.updated_at
            FROM list_members m
            JOIN subscribers s ON s.id = m.subscriber_id
            WHERE m.list_id = $1
            ORDER BY m.added_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(list_id)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
    }

    async fn auto_assign_lists(&self, subscriber_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO list_members (list_id, subscriber_id)
            SELECT id, $1 FROM contact_lists WHERE auto_assign = true
            ON CONFLICT (list_id, subscriber_id) DO NOTHING
            "#,
        )
        .bind(subscriber_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
