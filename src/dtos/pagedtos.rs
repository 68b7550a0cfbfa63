use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::pagemodel::SignupPage;

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let slug_regex = regex::Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$")
        .map_err(|_| ValidationError::new("invalid_slug_regex"))?;

    if !slug_regex.is_match(slug) {
        let mut error = ValidationError::new("invalid_slug");
        error.message = Some(Cow::from(
            "Slug must be lowercase letters, digits and hyphens",
        ));
        return Err(error);
    }
    Ok(())
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreatePageDto {
    #[validate(
        length(min = 1, max = 80, message = "Slug must be between 1-80 characters"),
        custom = "validate_slug"
    )]
    pub slug: String,

    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,
    pub list_id: Option<Uuid>,
    pub published: Option<bool>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdatePageDto {
    #[validate(
        length(min = 1, max = 80, message = "Slug must be between 1-80 characters"),
        custom = "validate_slug"
    )]
    pub slug: Option<String>,

    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,

    pub description: Option<String>,
    pub list_id: Option<Uuid>,
    pub published: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageData {
    pub page: SignupPage,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponseDto {
    pub status: String,
    pub data: PageData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageListResponseDto {
    pub status: String,
    pub pages: Vec<SignupPage>,
    pub results: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_slug() {
        let dto = CreatePageDto {
            slug: "spring-launch-2026".to_string(),
            title: "Spring launch".to_string(),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn rejects_uppercase_slug() {
        let dto = CreatePageDto {
            slug: "Spring-Launch".to_string(),
            title: "Spring launch".to_string(),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}
