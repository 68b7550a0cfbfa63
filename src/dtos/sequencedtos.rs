use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::sequencemodel::{Sequence, SequenceStatus, SequenceStep};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateSequenceDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub status: Option<SequenceStatus>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateSequenceDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    pub status: Option<SequenceStatus>,
}

fn validate_delay_time(delay_time: &str) -> Result<(), ValidationError> {
    let time_regex = regex::Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$")
        .map_err(|_| ValidationError::new("invalid_time_regex"))?;

    if !time_regex.is_match(delay_time) {
        let mut error = ValidationError::new("invalid_delay_time");
        error.message = Some(Cow::from("Send time must be in HH:MM 24-hour format"));
        return Err(error);
    }
    Ok(())
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateStepDto {
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Body is required"))]
    pub body_html: String,

    #[validate(range(min = 0, message = "Delay days cannot be negative"))]
    pub delay_days: i32,

    #[validate(custom = "validate_delay_time")]
    pub delay_time: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateStepDto {
    #[validate(length(min = 1, message = "Subject cannot be empty"))]
    pub subject: Option<String>,

    #[validate(length(min = 1, message = "Body cannot be empty"))]
    pub body_html: Option<String>,

    #[validate(range(min = 0, message = "Delay days cannot be negative"))]
    pub delay_days: Option<i32>,

    #[validate(custom = "validate_delay_time")]
    pub delay_time: Option<String>,
}

/// Drag-and-drop payload. The server only checks the ids belong to the
/// sequence; the final order is always recomputed from delay chronology.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ReorderStepsDto {
    #[validate(length(min = 1, message = "At least one step id is required"))]
    pub step_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SequenceData {
    pub sequence: Sequence,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SequenceResponseDto {
    pub status: String,
    pub data: SequenceData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SequenceListResponseDto {
    pub status: String,
    pub sequences: Vec<Sequence>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StepData {
    pub step: SequenceStep,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StepResponseDto {
    pub status: String,
    pub data: StepData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StepListResponseDto {
    pub status: String,
    pub steps: Vec<SequenceStep>,
    pub results: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_delay_time() {
        let dto = CreateStepDto {
            subject: "Day two".to_string(),
            body_html: "<p>hi</p>".to_string(),
            delay_days: 2,
            delay_time: Some("08:30".to_string()),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_delay_time() {
        let dto = CreateStepDto {
            subject: "Day two".to_string(),
            body_html: "<p>hi</p>".to_string(),
            delay_days: 2,
            delay_time: Some("8:30pm".to_string()),
        };
        assert!(dto.validate().is_err());
    }
}
