//! Task list handlers.

use super::schemas::CreateListBody;
use super::{success, success_message, AppState};
use crate::error::ApiError;
use crate::model::{Task, TaskList, TaskListRecord, TaskRecord};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Map, Value};

pub async fn get_all_lists(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let lists = state.lists.get_all()?;
    let records: Vec<TaskListRecord> = lists.iter().map(TaskList::to_record).collect();
    Ok(success(records))
}

pub async fn get_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let list = state.lists.get(&list_id)?;
    Ok(success(list.to_record()))
}

pub async fn get_tasks_of_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let tasks = state.lists.tasks_of(&list_id)?;
    let records: Vec<TaskRecord> = tasks.iter().map(Task::to_record).collect();
    Ok(success(records))
}

pub async fn create_list(
    State(state): State<AppState>,
    Json(body): Json<CreateListBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let list = state.lists.create(&body.name, body.order)?;
    Ok((StatusCode::CREATED, success(list.to_record())))
}

pub async fn update_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Json(patch): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    let list = state.lists.update(&list_id, &patch)?;
    Ok(success(list.to_record()))
}

pub async fn delete_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.lists.delete(&list_id)?;
    Ok(success_message("Task list deleted successfully"))
}
