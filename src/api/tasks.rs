//! Task handlers.

use super::schemas::CreateTaskBody;
use super::{success, success_message, AppState};
use crate::error::ApiError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Map, Value};

pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let task = state.tasks.get(&task_id)?;
    Ok(success(task.to_record()))
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<CreateTaskBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let task = state.tasks.create(body.into_draft()?)?;
    Ok((StatusCode::CREATED, success(task.to_record())))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(patch): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    let task = state.tasks.update(&task_id, &patch)?;
    Ok(success(task.to_record()))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.tasks.delete(&task_id)?;
    Ok(success_message("Task deleted successfully"))
}
