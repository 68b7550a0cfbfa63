use std::sync::Arc;

use axum::{
    extract::Query, response::IntoResponse, routing::get, Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::SubscriberExt,
    dtos::{FilterSubscriberDto, RequestQueryDto, SubscriberListResponseDto},
    error::HttpError,
    AppState,
};

pub fn subscribers_handler() -> Router {
    Router::new().route("/", get(list_subscribers))
}

pub async fn list_subscribers(
    Query(query_params): Query<RequestQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(20);

    let subscribers = app_state
        .db_client
        .get_subscribers(page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let subscribers: Vec<FilterSubscriberDto> = subscribers
        .iter()
        .map(FilterSubscriberDto::filter_subscriber)
        .collect();

    let results = subscribers.len() as i64;

    Ok(Json(SubscriberListResponseDto {
        status: "success".to_string(),
        subscribers,
        results,
    }))
}
