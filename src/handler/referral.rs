use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::Path,
    response::{IntoResponse, Redirect},
    routing::get,
    Extension, Json, Router,
};

use crate::{
    db::{MilestoneExt, SubscriberExt},
    dtos::{MilestoneProgressDto, ReferralDashboardDto, ReferralDashboardResponseDto},
    error::{ErrorMessage, HttpError},
    service::referral::generate_referral_link,
    AppState,
};

pub fn referral_handler() -> Router {
    Router::new().route("/dashboard/:code", get(dashboard))
}

/// Public: a subscriber's own progress page, addressed by referral code.
pub async fn dashboard(
    Path(code): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let subscriber = app_state
        .db_client
        .get_subscriber(None, None, None, Some(&code))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::not_found(
            ErrorMessage::SubscriberNotFound.to_string(),
        ))?;

    let achievements = app_state
        .db_client
        .get_achievements_for(subscriber.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let achieved_at: HashMap<uuid::Uuid, chrono::DateTime<chrono::Utc>> = achievements
        .into_iter()
        .map(|a| (a.milestone_id, a.achieved_at))
        .collect();

    let milestones = app_state
        .db_client
        .get_milestones()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let next_threshold = milestones
        .iter()
        .find(|m| m.threshold > subscriber.referral_count)
        .map(|m| m.threshold);

    let milestones = milestones
        .into_iter()
        .map(|m| {
            let achieved_at = achieved_at.get(&m.id).copied();
            MilestoneProgressDto {
                name: m.name,
                threshold: m.threshold,
                description: m.description,
                reward_type: m.reward_type.map(|r| r.to_str().to_string()),
                achieved: achieved_at.is_some(),
                achieved_at,
            }
        })
        .collect();

    let referral_link = generate_referral_link(&app_state.env.frontend_url, &code);

    Ok(Json(ReferralDashboardResponseDto {
        status: "success".to_string(),
        data: ReferralDashboardDto {
            referral_code: code,
            referral_link,
            referral_count: subscriber.referral_count,
            milestones,
            next_threshold,
        },
    }))
}

/// Public: short share link. Valid codes land on the signup page with the
/// code pre-filled; unknown codes still land on the signup page.
pub async fn referral_redirect(
    Path(code): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let known = app_state
        .db_client
        .get_subscriber(None, None, None, Some(&code))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .is_some();

    let target = if known {
        format!("{}/subscribe?ref={}", app_state.env.frontend_url, code)
    } else {
        format!("{}/subscribe", app_state.env.frontend_url)
    };

    Ok(Redirect::to(&target))
}
