use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{db::DBClient, SequenceExt},
    dtos::{
        CreateSequenceDto, CreateStepDto, ReorderStepsDto, Response, SequenceData,
        SequenceListResponseDto, SequenceResponseDto, StepListResponseDto, UpdateSequenceDto,
        UpdateStepDto,
    },
    error::HttpError,
    models::sequencemodel::{sort_steps_chronologically, SequenceStatus, SequenceStep},
    AppState,
};

pub fn sequences_handler() -> Router {
    Router::new()
        .route("/", get(list_sequences).post(create_sequence))
        .route(
            "/:id",
            get(get_sequence).put(update_sequence).delete(delete_sequence),
        )
        .route("/:id/steps", get(list_steps).post(create_step))
        .route("/:id/steps/reorder", post(reorder_steps))
        .route("/:id/steps/:step_id", put(update_step).delete(delete_step))
}

/// Reloads the steps, re-sorts them by delay chronology and persists the new
/// ranks. Called after every step mutation; manual ordering never survives.
async fn resequence_steps(
    db_client: &DBClient,
    sequence_id: Uuid,
) -> Result<Vec<SequenceStep>, sqlx::Error> {
    let mut steps = db_client.get_steps(sequence_id).await?;
    sort_steps_chronologically(&mut steps);

    let changed: Vec<(Uuid, i32)> = steps
        .iter()
        .enumerate()
        .filter(|(rank, step)| step.position != *rank as i32)
        .map(|(rank, step)| (step.id, rank as i32))
        .collect();

    if !changed.is_empty() {
        db_client.set_step_positions(&changed).await?;
    }

    for (rank, step) in steps.iter_mut().enumerate() {
        step.position = rank as i32;
    }

    Ok(steps)
}

pub async fn list_sequences(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let sequences = app_state
        .db_client
        .get_sequences()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = sequences.len() as i64;

    Ok(Json(SequenceListResponseDto {
        status: "success".to_string(),
        sequences,
        results,
    }))
}

pub async fn get_sequence(
    Path(sequence_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let sequence = app_state
        .db_client
        .get_sequence(sequence_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::not_found("Sequence not found".to_string()))?;

    Ok(Json(SequenceResponseDto {
        status: "success".to_string(),
        data: SequenceData { sequence },
    }))
}

pub async fn create_sequence(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateSequenceDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let sequence = app_state
        .db_client
        .save_sequence(body.name, body.status.unwrap_or(SequenceStatus::Draft))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(SequenceResponseDto {
        status: "success".to_string(),
        data: SequenceData { sequence },
    }))
}

pub async fn update_sequence(
    Path(sequence_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateSequenceDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let sequence = app_state
        .db_client
        .update_sequence(sequence_id, body.name, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::not_found("Sequence not found".to_string()))?;

    Ok(Json(SequenceResponseDto {
        status: "success".to_string(),
        data: SequenceData { sequence },
    }))
}

pub async fn delete_sequence(
    Path(sequence_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_sequence(sequence_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Sequence not found".to_string()));
    }

    Ok(Json(Response {
        status: "success",
        message: "Sequence deleted".to_string(),
    }))
}

pub async fn list_steps(
    Path(sequence_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_sequence_exists(&app_state, sequence_id).await?;

    let steps = app_state
        .db_client
        .get_steps(sequence_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = steps.len() as i64;

    Ok(Json(StepListResponseDto {
        status: "success".to_string(),
        steps,
        results,
    }))
}

pub async fn create_step(
    Path(sequence_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateStepDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    ensure_sequence_exists(&app_state, sequence_id).await?;

    let current = app_state
        .db_client
        .get_steps(sequence_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .save_step(
            sequence_id,
            body.subject,
            body.body_html,
            body.delay_days,
            body.delay_time,
            current.len() as i32,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let steps = resequence_steps(&app_state.db_client, sequence_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = steps.len() as i64;

    Ok(Json(StepListResponseDto {
        status: "success".to_string(),
        steps,
        results,
    }))
}

pub async fn update_step(
    Path((sequence_id, step_id)): Path<(Uuid, Uuid)>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateStepDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_step(sequence_id, step_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::not_found("Step not found".to_string()))?;

    app_state
        .db_client
        .update_step(
            step_id,
            body.subject,
            body.body_html,
            body.delay_days,
            body.delay_time,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let steps = resequence_steps(&app_state.db_client, sequence_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = steps.len() as i64;

    Ok(Json(StepListResponseDto {
        status: "success".to_string(),
        steps,
        results,
    }))
}

pub async fn delete_step(
    Path((sequence_id, step_id)): Path<(Uuid, Uuid)>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_step(sequence_id, step_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Step not found".to_string()));
    }

    let steps = resequence_steps(&app_state.db_client, sequence_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = steps.len() as i64;

    Ok(Json(StepListResponseDto {
        status: "success".to_string(),
        steps,
        results,
    }))
}

/// Drag-and-drop endpoint. The submitted order is only used to verify the
/// ids; the stored order is always recomputed from (delay_days, delay_time).
pub async fn reorder_steps(
    Path(sequence_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ReorderStepsDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let current = app_state
        .db_client
        .get_steps(sequence_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    for step_id in &body.step_ids {
        if !current.iter().any(|s| s.id == *step_id) {
            return Err(HttpError::bad_request(format!(
                "Step {} does not belong to this sequence",
                step_id
            )));
        }
    }

    let steps = resequence_steps(&app_state.db_client, sequence_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = steps.len() as i64;

    Ok(Json(StepListResponseDto {
        status: "success".to_string(),
        steps,
        results,
    }))
}

async fn ensure_sequence_exists(
    app_state: &Arc<AppState>,
    sequence_id: Uuid,
) -> Result<(), HttpError> {
    app_state
        .db_client
        .get_sequence(sequence_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::not_found("Sequence not found".to_string()))?;

    Ok(())
}
