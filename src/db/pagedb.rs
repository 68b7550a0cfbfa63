use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::pagemodel::SignupPage;

#[async_trait]
pub trait SignupPageExt {
    async fn get_pages(&self) -> Result<Vec<SignupPage>, sqlx::Error>;

    async fn get_page(&self, page_id: Uuid) -> Result<Option<SignupPage>, sqlx::Error>;

    /// Public lookup; `published_only` hides drafts from visitors.
    async fn get_page_by_slug(
        &self,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<SignupPage>, sqlx::Error>;

    async fn save_page(
        &self,
        slug: String,
        title: String,
        description: Option<String>,
        list_id: Option<Uuid>,
        published: bool,
    ) -> Result<SignupPage, sqlx::Error>;

    async fn update_page(
        &self,
        page_id: Uuid,
        slug: Option<String>,
        title: Option<String>,
        description: Option<String>,
        list_id: Option<Uuid>,
        published: Option<bool>,
    ) -> Result<Option<SignupPage>, sqlx::Error>;

    async fn delete_page(&self, page_id: Uuid) -> Result<u64, sqlx::Error>;
}

const PAGE_COLUMNS: &str = r#"
    id, slug, title, description, list_id, published, created_at, updated_at
"#;

#[async_trait]
impl SignupPageExt for DBClient {
    async fn get_pages(&self) -> Result<Vec<SignupPage>, sqlx::Error> {
        sqlx::query_as::<_, SignupPage>(&format!(
            r#"
            SELECT {PAGE_COLUMNS} FROM signup_pages
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_page(&self, page_id: Uuid) -> Result<Option<SignupPage>, sqlx::Error> {
        sqlx::query_as::<_, SignupPage>(&format!(
            "SELECT {PAGE_COLUMNS} FROM signup_pages WHERE id = $1"
        ))
        .bind(page_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_page_by_slug(
        &self,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<SignupPage>, sqlx::Error> {
        if published_only {
            sqlx::query_as::<_, SignupPage>(&format!(
                "SELECT {PAGE_COLUMNS} FROM signup_pages WHERE slug = $1 AND published = true"
            ))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, SignupPage>(&format!(
                "SELECT {PAGE_COLUMNS} FROM signup_pages WHERE slug = $1"
            ))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
        }
    }

    async fn save_page(
        &self,
        slug: String,
        title: String,
        description: Option<String>,
        list_id: Option<Uuid>,
        published: bool,
    ) -> Result<SignupPage, sqlx::Error> {
        sqlx::query_as::<_, SignupPage>(&format!(
            r#"
            INSERT INTO signup_pages (slug, title, description, list_id, published)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PAGE_COLUMNS}
            "#
        ))
        .bind(slug)
        .bind(title)
        .bind(description)
        .bind(list_id)
        .bind(published)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_page(
        &self,
        page_id: Uuid,
        slug: Option<String>,
        title: Option<String>,
        description: Option<String>,
        list_id: Option<Uuid>,
        published: Option<bool>,
    ) -> Result<Option<SignupPage>, sqlx::Error> {
        sqlx::query_as::<_, SignupPage>(&format!(
            r#"
            UPDATE signup_pages
            SET slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                list_id = COALESCE($5, list_id),
                published = COALESCE($6, published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PAGE_COLUMNS}
            "#
        ))
        .bind(page_id)
        .bind(slug)
        .bind(title)
        .bind(description)
        .bind(list_id)
        .bind(published)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_page(&self, page_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM signup_pages WHERE id = $1")
            .bind(page_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
