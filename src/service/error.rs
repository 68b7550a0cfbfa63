use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Subscriber {0} not found")]
    SubscriberNotFound(Uuid),

    #[error("Milestone {0} not found")]
    MilestoneNotFound(Uuid),

    #[error("A milestone with threshold {0} already exists")]
    DuplicateThreshold(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Captcha verification failed: {0}")]
    Captcha(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Contact sync error: {0}")]
    Sync(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::SubscriberNotFound(_) | ServiceError::MilestoneNotFound(_) => {
                HttpError::not_found(error.to_string())
            }

            ServiceError::DuplicateThreshold(_) => HttpError::conflict(error.to_string()),

            ServiceError::Validation(_) | ServiceError::Captcha(_) => {
                HttpError::bad_request(error.to_string())
            }

            _ => HttpError::server_error(error.to_string()),
        }
    }
}

impl From<String> for ServiceError {
    fn from(err: String) -> Self {
        ServiceError::Other(err)
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::SubscriberNotFound(_) | ServiceError::MilestoneNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            ServiceError::DuplicateThreshold(_) => StatusCode::CONFLICT,

            ServiceError::Validation(_) | ServiceError::Captcha(_) => StatusCode::BAD_REQUEST,

            ServiceError::Database(_)
            | ServiceError::Notification(_)
            | ServiceError::Sync(_)
            | ServiceError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
