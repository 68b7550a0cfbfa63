use crate::service::error::ServiceError;

const VERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

/// Verifies a client captcha token against the challenge provider. Callers
/// skip this entirely when no secret is configured.
pub async fn verify_captcha(secret: &str, token: &str) -> Result<(), ServiceError> {
    if token.is_empty() {
        return Err(ServiceError::Captcha("missing captcha token".to_string()));
    }

    let client = reqwest::Client::new();
    let params = [("secret", secret), ("response", token)];

    let response = client
        .post(VERIFY_URL)
        .form(&params)
        .send()
        .await
        .map_err(|e| ServiceError::Captcha(format!("network error: {}", e)))?;

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| ServiceError::Captcha(format!("invalid response: {}", e)))?;

    if body
        .get("success")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
    {
        Ok(())
    } else {
        let codes = body
            .get("error-codes")
            .map(|v| v.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Err(ServiceError::Captcha(codes))
    }
}
