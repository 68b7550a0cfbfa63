use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::sequencemodel::{Sequence, SequenceStatus, SequenceStep};

#[async_trait]
pub trait SequenceExt {
    async fn get_sequences(&self) -> Result<Vec<Sequence>, sqlx::Error>;

    async fn get_sequence(&self, sequence_id: Uuid) -> Result<Option<Sequence>, sqlx::Error>;

    async fn save_sequence(
        &self,
        name: String,
        status: SequenceStatus,
    ) -> Result<Sequence, sqlx::Error>;

    async fn update_sequence(
        &self,
        sequence_id: Uuid,
        name: Option<String>,
        status: Option<SequenceStatus>,
    ) -> Result<Option<Sequence>, sqlx::Error>;

    async fn delete_sequence(&self, sequence_id: Uuid) -> Result<u64, sqlx::Error>;

    /// Steps in stored position order.
    async fn get_steps(&self, sequence_id: Uuid) -> Result<Vec<SequenceStep>, sqlx::Error>;

    async fn get_step(
        &self,
        sequence_id: Uuid,
        step_id: Uuid,
    ) -> Result<Option<SequenceStep>, sqlx::Error>;

    async fn save_step(
        &self,
        sequence_id: Uuid,
        subject: String,
        body_html: String,
        delay_days: i32,
        delay_time: Option<String>,
        position: i32,
    ) -> Result<SequenceStep, sqlx::Error>;

    async fn update_step(
        &self,
        step_id: Uuid,
        subject: Option<String>,
        body_html: Option<String>,
        delay_days: Option<i32>,
        delay_time: Option<String>,
    ) -> Result<Option<SequenceStep>, sqlx::Error>;

    async fn delete_step(&self, sequence_id: Uuid, step_id: Uuid) -> Result<u64, sqlx::Error>;

    /// Persists chronological ranks computed by the caller.
    async fn set_step_positions(
        &self,
        positions: &[(Uuid, i32)],
    ) -> Result<(), sqlx::Error>;

    /// Enrolls the subscriber into every currently-active sequence; already
    /// enrolled pairs are ignored. Returns how many enrollments were created.
    async fn enroll_in_active_sequences(&self, subscriber_id: Uuid) -> Result<u64, sqlx::Error>;
}

const STEP_COLUMNS: &str = r#"
    id, sequence_id, subject, body_html, delay_days, delay_time, position,
    created_at, updated_at
"#;

#[async_trait]
impl SequenceExt for DBClient {
    async fn get_sequences(&self) -> Result<Vec<Sequence>, sqlx::Error> {
        sqlx::query_as::<_, Sequence>(
            r#"
            SELECT id, name, status, created_at, updated_at
            FROM sequences
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_sequence(&self, sequence_id: Uuid) -> Result<Option<Sequence>, sqlx::Error> {
        sqlx::query_as::<_, Sequence>(
            r#"
            SELECT id, name, status, created_at, updated_at
            FROM sequences
            WHERE id = $1
            "#,
        )
        .bind(sequence_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_sequence(
        &self,
        name: String,
        status: SequenceStatus,
    ) -> Result<Sequence, sqlx::Error> {
        sqlx::query_as::<_, Sequence>(
            r#"
            INSERT INTO sequences (name, status)
            VALUES ($1, $2)
            RETURNING id, name, status, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_sequence(
        &self,
        sequence_id: Uuid,
        name: Option<String>,
        status: Option<SequenceStatus>,
    ) -> Result<Option<Sequence>, sqlx::Error> {
        sqlx::query_as::<_, Sequence>(
            r#"
            UPDATE sequences
            SET name = COALESCE($2, name),
                status = COALESCE($3, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, status, created_at, updated_at
            "#,
        )
        .bind(sequence_id)
        .bind(name)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_sequence(&self, sequence_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sequences WHERE id = $1")
            .bind(sequence_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_steps(&self, sequence_id: Uuid) -> Result<Vec<SequenceStep>, sqlx::Error> {
        sqlx::query_as::<_, SequenceStep>(&format!(
            r#"
            SELECT {STEP_COLUMNS} FROM sequence_steps
            WHERE sequence_id = $1
            ORDER BY position ASC
            "#
        ))
        .bind(sequence_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_step(
        &self,
        sequence_id: Uuid,
        step_id: Uuid,
    ) -> Result<Option<SequenceStep>, sqlx::Error> {
        sqlx::query_as::<_, SequenceStep>(&format!(
            r#"
            SELECT {STEP_COLUMNS} FROM sequence_steps
            WHERE id = $1 AND sequence_id = $2
            "#
        ))
        .bind(step_id)
        .bind(sequence_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_step(
        &self,
        sequence_id: Uuid,
        subject: String,
        body_html: String,
        delay_days: i32,
        delay_time: Option<String>,
        position: i32,
    ) -> Result<SequenceStep, sqlx::Error> {
        sqlx::query_as::<_, SequenceStep>(&format!(
            r#"
            INSERT INTO sequence_steps (sequence_id, subject, body_html, delay_days, delay_time, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {STEP_COLUMNS}
            "#
        ))
        .bind(sequence_id)
        .bind(subject)
        .bind(body_html)
        .bind(delay_days)
        .bind(delay_time)
        .bind(position)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_step(
        &self,
        step_id: Uuid,
        subject: Option<String>,
        body_html: Option<String>,
        delay_days: Option<i32>,
        delay_time: Option<String>,
    ) -> Result<Option<SequenceStep>, sqlx::Error> {
        sqlx::query_as::<_, SequenceStep>(&format!(
            r#"
            UPDATE sequence_steps
            SET subject = COALESCE($2, subject),
                body_html = COALESCE($3, body_html),
                delay_days = COALESCE($4, delay_days),
                delay_time = COALESCE($5, delay_time),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {STEP_COLUMNS}
            "#
        ))
        .bind(step_id)
        .bind(subject)
        .bind(body_html)
        .bind(delay_days)
        .bind(delay_time)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_step(&self, sequence_id: Uuid, step_id: Uuid) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM sequence_steps WHERE id = $1 AND sequence_id = $2")
                .bind(step_id)
                .bind(sequence_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    async fn set_step_positions(&self, positions: &[(Uuid, i32)]) -> Result<(), sqlx::Error> {
        for (step_id, position) in positions {
            sqlx::query(
                r#"
                UPDATE sequence_steps
                SET position = $2, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(step_id)
            .bind(position)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn enroll_in_active_sequences(&self, subscriber_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO sequence_enrollments (sequence_id, subscriber_id)
            SELECT id, $1 FROM sequences WHERE status = 'active'::sequence_status
            ON CONFLICT (sequence_id, subscriber_id) DO NOTHING
            "#,
        )
        .bind(subscriber_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
