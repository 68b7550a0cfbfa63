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
    db::SignupPageExt,
    dtos::{
        CreatePageDto, PageData, PageListResponseDto, PageResponseDto, Response, UpdatePageDto,
    },
    error::{ErrorMessage, HttpError},
    AppState,
};

pub fn pages_handler() -> Router {
    Router::new()
        .route("/", get(list_pages).post(create_page))
        .route("/:id", put(update_page).delete(delete_page))
}

pub async fn list_pages(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let pages = app_state
        .db_client
        .get_pages()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = pages.len() as i64;

    Ok(Json(PageListResponseDto {
        status: "success".to_string(),
        pages,
        results,
    }))
}

pub async fn create_page(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreatePageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_page_by_slug(&body.slug, false)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::conflict(ErrorMessage::DuplicateSlug.to_string()));
    }

    let page = app_state
        .db_client
        .save_page(
            body.slug,
            body.title,
            body.description,
            body.list_id,
            body.published.unwrap_or(false),
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                HttpError::conflict(ErrorMessage::DuplicateSlug.to_string())
            } else {
                HttpError::server_error(e.to_string())
            }
        })?;

    Ok(Json(PageResponseDto {
        status: "success".to_string(),
        data: PageData { page },
    }))
}

pub async fn update_page(
    Path(page_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdatePageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if let Some(ref slug) = body.slug {
        let existing = app_state
            .db_client
            .get_page_by_slug(slug, false)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        if existing.map(|p| p.id != page_id).unwrap_or(false) {
            return Err(HttpError::conflict(ErrorMessage::DuplicateSlug.to_string()));
        }
    }

    let page = app_state
        .db_client
        .update_page(
            page_id,
            body.slug,
            body.title,
            body.description,
            body.list_id,
            body.published,
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                HttpError::conflict(ErrorMessage::DuplicateSlug.to_string())
            } else {
                HttpError::server_error(e.to_string())
            }
        })?
        .ok_or(HttpError::not_found("Signup page not found".to_string()))?;

    Ok(Json(PageResponseDto {
        status: "success".to_string(),
        data: PageData { page },
    }))
}

pub async fn delete_page(
    Path(page_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_page(page_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Signup page not found".to_string()));
    }

    Ok(Json(Response {
        status: "success",
        message: "Signup page deleted".to_string(),
    }))
}

/// Public view used by the hosted signup form; drafts stay hidden.
pub async fn get_public_page(
    Path(slug): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let page = app_state
        .db_client
        .get_page_by_slug(&slug, true)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::not_found("Signup page not found".to_string()))?;

    Ok(Json(PageResponseDto {
        status: "success".to_string(),
        data: PageData { page },
    }))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
