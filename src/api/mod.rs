//! HTTP API.
//!
//! Axum router and handlers over the use-case services. Every response is
//! wrapped in the `{"successful": ...}` envelope; errors map to 404 for
//! missing entities, 400 for validation failures, and 500 otherwise.

pub mod lists;
pub mod schemas;
pub mod tasks;

use crate::error::ApiError;
use crate::service::{TaskListService, TaskService};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub lists: Arc<TaskListService>,
    pub tasks: Arc<TaskService>,
}

impl AppState {
    pub fn new(lists: Arc<TaskListService>, tasks: Arc<TaskService>) -> Self {
        Self { lists, tasks }
    }
}

/// Wrap a payload in the success envelope.
pub(crate) fn success<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "successful": true, "data": data }))
}

/// Success envelope for operations that return no entity (deletes).
pub(crate) fn success_message(message: &str) -> Json<Value> {
    Json(json!({ "successful": true, "message": message }))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.code.is_not_found() {
            StatusCode::NOT_FOUND
        } else if self.code.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = Json(json!({ "successful": false, "error": self.message }));
        (status, body).into_response()
    }
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Task list routes
        .route(
            "/lists/",
            get(lists::get_all_lists).post(lists::create_list),
        )
        .route(
            "/lists/{list_id}",
            get(lists::get_list)
                .put(lists::update_list)
                .delete(lists::delete_list),
        )
        .route("/lists/{list_id}/tasks", get(lists::get_tasks_of_list))
        // Task routes
        .route("/task/", post(tasks::create_task))
        .route(
            "/task/{task_id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
