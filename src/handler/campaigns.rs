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
    db::{CampaignExt, SubscriberExt},
    dtos::{
        AbTestDto, AbTestResponseDto, CampaignData, CampaignListResponseDto, CampaignResponseDto,
        CreateCampaignDto, Response, UpdateVariantStatsDto,
    },
    error::HttpError,
    service::abtest::{determine_winner, test_ratio},
    AppState,
};

pub fn campaigns_handler() -> Router {
    Router::new()
        .route("/", get(list_campaigns).post(create_campaign))
        .route("/:id", get(get_campaign).delete(delete_campaign))
        .route("/:id/stats", put(update_stats))
        .route("/:id/ab-test", get(ab_test))
}

pub async fn list_campaigns(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let campaigns = app_state
        .db_client
        .get_campaigns()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = campaigns.len() as i64;

    Ok(Json(CampaignListResponseDto {
        status: "success".to_string(),
        campaigns,
        results,
    }))
}

pub async fn get_campaign(
    Path(campaign_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let campaign = app_state
        .db_client
        .get_campaign(campaign_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::not_found("Campaign not found".to_string()))?;

    Ok(Json(CampaignResponseDto {
        status: "success".to_string(),
        data: CampaignData { campaign },
    }))
}

pub async fn create_campaign(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateCampaignDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let campaign = app_state
        .db_client
        .save_campaign(body.name, body.subject_a, body.subject_b)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(CampaignResponseDto {
        status: "success".to_string(),
        data: CampaignData { campaign },
    }))
}

pub async fn update_stats(
    Path(campaign_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateVariantStatsDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let campaign = app_state
        .db_client
        .update_variant_stats(
            campaign_id,
            body.a_open_rate,
            body.a_click_rate,
            body.b_open_rate,
            body.b_click_rate,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::not_found("Campaign not found".to_string()))?;

    Ok(Json(CampaignResponseDto {
        status: "success".to_string(),
        data: CampaignData { campaign },
    }))
}

pub async fn delete_campaign(
    Path(campaign_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_campaign(campaign_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Campaign not found".to_string()));
    }

    Ok(Json(Response {
        status: "success",
        message: "Campaign deleted".to_string(),
    }))
}

/// Current A/B plan for a campaign: how large the test send should be given
/// today's audience, and the winning variant once both sides have stats.
pub async fn ab_test(
    Path(campaign_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let campaign = app_state
        .db_client
        .get_campaign(campaign_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::not_found("Campaign not found".to_string()))?;

    if campaign.subject_b.is_none() {
        return Err(HttpError::bad_request(
            "A/B testing is not enabled for this campaign".to_string(),
        ));
    }

    let active_subscribers = app_state
        .db_client
        .count_active_subscribers()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let winner = match (campaign.variant_a_stats(), campaign.variant_b_stats()) {
        (Some(a), Some(b)) => Some(determine_winner(&a, &b).to_str().to_string()),
        _ => None,
    };

    Ok(Json(AbTestResponseDto {
        status: "success".to_string(),
        data: AbTestDto {
            test_ratio: test_ratio(active_subscribers),
            active_subscribers,
            winner,
        },
    }))
}
