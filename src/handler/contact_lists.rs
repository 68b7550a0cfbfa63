use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::ContactListExt,
    dtos::{
        CreateListDto, FilterSubscriberDto, ListData, ListMembersResponseDto, ListResponseDto,
        ListsResponseDto, RequestQueryDto, Response, UpdateListDto,
    },
    error::HttpError,
    AppState,
};

pub fn lists_handler() -> Router {
    Router::new()
        .route("/", get(list_lists).post(create_list))
        .route("/:id", put(update_list).delete(delete_list))
        .route("/:id/members", get(list_members))
}

pub async fn list_lists(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let lists = app_state
        .db_client
        .get_lists()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = lists.len() as i64;

    Ok(Json(ListsResponseDto {
        status: "success".to_string(),
        lists,
        results,
    }))
}

pub async fn create_list(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateListDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let list = app_state
        .db_client
        .save_list(
            body.name,
            body.description,
            body.auto_assign.unwrap_or(false),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponseDto {
        status: "success".to_string(),
        data: ListData { list },
    }))
}

pub async fn update_list(
    Path(list_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateListDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let list = app_state
        .db_client
        .update_list(list_id, body.name, body.description, body.auto_assign)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::not_found("Contact list not found".to_string()))?;

    Ok(Json(ListResponseDto {
        status: "success".to_string(),
        data: ListData { list },
    }))
}

pub async fn delete_list(
    Path(list_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_list(list_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Contact list not found".to_string()));
    }

    Ok(Json(Response {
        status: "success",
        message: "Contact list deleted".to_string(),
    }))
}

pub async fn list_members(
    Path(list_id): Path<Uuid>,
    Query(query_params): Query<RequestQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(20);

    app_state
        .db_client
        .get_list(list_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::not_found("Contact list not found".to_string()))?;

    let members = app_state
        .db_client
        .get_list_members(list_id, page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let members: Vec<FilterSubscriberDto> = members
        .iter()
        .map(FilterSubscriberDto::filter_subscriber)
        .collect();

    let results = members.len() as i64;

    Ok(Json(ListMembersResponseDto {
        status: "success".to_string(),
        members,
        results,
    }))
}
