use serde_json::json;

use crate::{models::subscribermodel::Subscriber, service::error::ServiceError};

/// Pushes a confirmed subscriber to the external contact/segment service.
/// Best-effort: the confirm flow logs and swallows any error from here.
pub async fn sync_subscriber(
    api_url: &str,
    api_key: &str,
    subscriber: &Subscriber,
) -> Result<(), ServiceError> {
    let client = reqwest::Client::new();

    let request_body = json!({
        "email": subscriber.email,
        "name": subscriber.name,
        "status": subscriber.status.to_str(),
        "referral_code": subscriber.referral_code,
        "subscribed_at": subscriber.subscribed_at,
    });

    let response = client
        .post(format!("{}/contacts", api_url.trim_end_matches('/')))
        .header("Authorization", format!("Bearer {}", api_key))
        .json(&request_body)
        .send()
        .await
        .map_err(|e| ServiceError::Sync(format!("network error: {}", e)))?;

    let status = response.status();
    if status.is_success() {
        tracing::info!("Synced subscriber {} to contact service", subscriber.email);
        Ok(())
    } else {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "no response body".to_string());
        Err(ServiceError::Sync(format!(
            "contact service error ({}): {}",
            status.as_u16(),
            body
        )))
    }
}
