use std::sync::Arc;

use axum::{
    extract::Request, http::header, middleware::Next, response::IntoResponse, Extension,
};

use crate::{
    error::{ErrorMessage, HttpError},
    AppState,
};

/// Guards the /api/admin surface. The dashboard authenticates with the
/// configured token, either as a Bearer header or x-api-key.
pub async fn admin_auth(
    Extension(app_state): Extension<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let token = req
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| {
                    if auth_value.starts_with("Bearer ") {
                        Some(auth_value[7..].to_owned())
                    } else {
                        None
                    }
                })
        });

    let token = token.ok_or_else(|| {
        HttpError::unauthorized(ErrorMessage::TokenNotProvided.to_string())
    })?;

    if token != app_state.env.admin_api_token {
        return Err(HttpError::unauthorized(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    Ok(next.run(req).await)
}
