use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::subscribermodel::Subscriber;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SubscribeDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    /// Referral code of the subscriber who shared their link.
    pub referral_code: Option<String>,

    /// Slug of the signup page the request came from, if any.
    pub page_slug: Option<String>,

    pub captcha_token: Option<String>,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct RequestQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

/// Public-safe projection; never exposes the confirmation token.
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterSubscriberDto {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub status: String,
    pub referral_code: Option<String>,
    pub referral_count: i32,
    pub subscribed_at: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl FilterSubscriberDto {
    pub fn filter_subscriber(subscriber: &Subscriber) -> Self {
        FilterSubscriberDto {
            id: subscriber.id.to_string(),
            email: subscriber.email.to_owned(),
            name: subscriber.name.clone(),
            status: subscriber.status.to_str().to_string(),
            referral_code: subscriber.referral_code.clone(),
            referral_count: subscriber.referral_count,
            subscribed_at: subscriber.subscribed_at,
            created_at: subscriber.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriberData {
    pub subscriber: FilterSubscriberDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriberResponseDto {
    pub status: String,
    pub data: SubscriberData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriberListResponseDto {
    pub status: String,
    pub subscribers: Vec<FilterSubscriberDto>,
    pub results: i64,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}
