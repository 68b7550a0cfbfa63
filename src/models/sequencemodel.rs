use chrono::prelude::*;
use serde::{Deserialize, Serialize};

/// Steps without an explicit send time sort as if scheduled here.
pub const DEFAULT_SEND_TIME: &str = "09:00";

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "sequence_status", rename_all = "snake_case")]
pub enum SequenceStatus {
    Draft,
    Active,
    Paused,
}

impl SequenceStatus {
    pub fn to_str(&self) -> &str {
        match self {
            SequenceStatus::Draft => "draft",
            SequenceStatus::Active => "active",
            SequenceStatus::Paused => "paused",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Sequence {
    pub id: uuid::Uuid,
    pub name: String,
    pub status: SequenceStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct SequenceStep {
    pub id: uuid::Uuid,
    pub sequence_id: uuid::Uuid,
    pub subject: String,
    pub body_html: String,

    /// Days after enrollment.
    pub delay_days: i32,

    /// Optional HH:MM send time; chronology falls back to DEFAULT_SEND_TIME.
    pub delay_time: Option<String>,

    /// Chronological rank within the sequence, maintained by the handlers.
    pub position: i32,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl SequenceStep {
    /// Sort key: delay chronology, not manual order.
    pub fn send_key(&self) -> (i32, String) {
        (
            self.delay_days,
            self.delay_time
                .clone()
                .unwrap_or_else(|| DEFAULT_SEND_TIME.to_string()),
        )
    }
}

/// Re-sorts steps by (delay_days, delay_time-or-default). Zero-padded HH:MM
/// strings compare correctly as text.
pub fn sort_steps_chronologically(steps: &mut [SequenceStep]) {
    steps.sort_by_key(|s| s.send_key());
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct SequenceEnrollment {
    pub id: uuid::Uuid,
    pub sequence_id: uuid::Uuid,
    pub subscriber_id: uuid::Uuid,
    pub current_step: i32,
    pub enrolled_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(delay_days: i32, delay_time: Option<&str>) -> SequenceStep {
        SequenceStep {
            id: uuid::Uuid::new_v4(),
            sequence_id: uuid::Uuid::nil(),
            subject: "s".to_string(),
            body_html: "<p>s</p>".to_string(),
            delay_days,
            delay_time: delay_time.map(|t| t.to_string()),
            position: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn sorts_by_day_before_time() {
        let mut steps = vec![step(1, Some("08:00")), step(0, Some("10:00"))];
        sort_steps_chronologically(&mut steps);
        assert_eq!(steps[0].delay_days, 0);
        assert_eq!(steps[1].delay_days, 1);
    }

    #[test]
    fn missing_time_sorts_as_default() {
        // 09:00 default lands between 08:00 and 10:00 on the same day
        let mut steps = vec![
            step(2, Some("10:00")),
            step(2, None),
            step(2, Some("08:00")),
        ];
        sort_steps_chronologically(&mut steps);
        assert_eq!(steps[0].delay_time.as_deref(), Some("08:00"));
        assert_eq!(steps[1].delay_time, None);
        assert_eq!(steps[2].delay_time.as_deref(), Some("10:00"));
    }
}
