use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{MilestoneExt, SubscriberExt},
    dtos::{
        CreateMilestoneDto, MilestoneData, MilestoneListResponseDto, MilestoneResponseDto,
        ReferralStatsDto, ReferralStatsResponseDto, Response, UpdateMilestoneDto,
    },
    error::{ErrorMessage, HttpError},
    AppState,
};

pub fn milestones_handler() -> Router {
    Router::new()
        .route("/", get(list_milestones).post(create_milestone))
        .route("/:id", put(update_milestone).delete(delete_milestone))
}

pub async fn list_milestones(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let milestones = app_state
        .db_client
        .get_milestones()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = milestones.len() as i64;

    Ok(Json(MilestoneListResponseDto {
        status: "success".to_string(),
        milestones,
        results,
    }))
}

pub async fn create_milestone(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateMilestoneDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_milestone_by_threshold(body.threshold)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::conflict(
            ErrorMessage::DuplicateThreshold.to_string(),
        ));
    }

    let milestone = app_state
        .db_client
        .save_milestone(
            body.threshold,
            body.name,
            body.description,
            body.reward_type,
            body.reward_value,
        )
        .await
        .map_err(|e| {
            // Concurrent create with the same threshold loses the race here
            if is_unique_violation(&e) {
                HttpError::conflict(ErrorMessage::DuplicateThreshold.to_string())
            } else {
                HttpError::server_error(e.to_string())
            }
        })?;

    Ok(Json(MilestoneResponseDto {
        status: "success".to_string(),
        data: MilestoneData { milestone },
    }))
}

pub async fn update_milestone(
    Path(milestone_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateMilestoneDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if let Some(threshold) = body.threshold {
        let existing = app_state
            .db_client
            .get_milestone_by_threshold(threshold)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        if existing.map(|m| m.id != milestone_id).unwrap_or(false) {
            return Err(HttpError::conflict(
                ErrorMessage::DuplicateThreshold.to_string(),
            ));
        }
    }

    let milestone = app_state
        .db_client
        .update_milestone(
            milestone_id,
            body.threshold,
            body.name,
            body.description,
            body.reward_type,
            body.reward_value,
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                HttpError::conflict(ErrorMessage::DuplicateThreshold.to_string())
            } else {
                HttpError::server_error(e.to_string())
            }
        })?
        .ok_or(HttpError::not_found(
            ErrorMessage::MilestoneNotFound.to_string(),
        ))?;

    Ok(Json(MilestoneResponseDto {
        status: "success".to_string(),
        data: MilestoneData { milestone },
    }))
}

pub async fn delete_milestone(
    Path(milestone_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_milestone(milestone_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found(
            ErrorMessage::MilestoneNotFound.to_string(),
        ));
    }

    Ok(Json(Response {
        status: "success",
        message: "Milestone deleted".to_string(),
    }))
}

pub async fn referral_stats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let total_active_subscribers = app_state
        .db_client
        .count_active_subscribers()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total_referred_subscribers = app_state
        .db_client
        .count_referred_active()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total_achievements = app_state
        .db_client
        .count_achievements()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let top_referrers = app_state
        .db_client
        .top_referrers(10)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let milestone_counts = app_state
        .db_client
        .achievement_counts_per_milestone()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ReferralStatsResponseDto {
        status: "success".to_string(),
        data: ReferralStatsDto {
            total_active_subscribers,
            total_referred_subscribers,
            total_achievements,
            top_referrers,
            milestone_counts,
        },
    }))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
