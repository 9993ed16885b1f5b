//! HTTP handlers for the `/tasks` resource.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/tasks` | 200, array of tasks in store order |
//! | POST | `/tasks` | 201, created task |
//! | DELETE | `/tasks/{id}` | 204, also for unknown ids |
//! | PATCH | `/tasks/{id}` | 200, task with replaced `completed` |
//! | PUT | `/tasks/{id}` | 200, task with replaced `text` |

use crate::error::ApiErrorResponse;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use log::debug;
use serde::{Deserialize, Serialize};
use tasklist_core::{core_version, Task, TaskId};
use uuid::Uuid;

/// Body for `POST /tasks` and `PUT /tasks/{id}`.
///
/// A missing `text` field is read as empty and rejected as a validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskTextRequest {
    #[serde(default)]
    pub text: String,
}

/// Body for `PATCH /tasks/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaskCompletionRequest {
    pub completed: bool,
}

/// `GET /`: plain-text liveness banner.
pub async fn root() -> String {
    format!("task list API running (core {})", core_version())
}

pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiErrorResponse> {
    let tasks = state.with_service(|service| service.list_tasks()).await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskTextRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiErrorResponse> {
    let Json(request) = payload.map_err(invalid_body)?;
    let created = state
        .with_service(move |service| service.create_task(&request.text))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Deletes by id. Unknown and malformed ids match nothing and still yield 204.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let Some(id) = parse_task_id(&raw_id) else {
        debug!("event=task_delete module=server status=noop reason=malformed_id");
        return Ok(StatusCode::NO_CONTENT);
    };
    state
        .with_service(move |service| service.delete_task(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn patch_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<TaskCompletionRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiErrorResponse> {
    let id = require_task_id(&raw_id)?;
    let Json(request) = payload.map_err(invalid_body)?;
    let updated = state
        .with_service(move |service| service.set_completed(id, request.completed))
        .await?;
    Ok(Json(updated))
}

pub async fn put_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<TaskTextRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiErrorResponse> {
    let id = require_task_id(&raw_id)?;
    let Json(request) = payload.map_err(invalid_body)?;
    let updated = state
        .with_service(move |service| service.update_text(id, &request.text))
        .await?;
    Ok(Json(updated))
}

fn parse_task_id(raw: &str) -> Option<TaskId> {
    Uuid::parse_str(raw).ok()
}

fn require_task_id(raw: &str) -> Result<TaskId, ApiErrorResponse> {
    parse_task_id(raw).ok_or_else(|| ApiErrorResponse::not_found(format!("task not found: {raw}")))
}

fn invalid_body(rejection: JsonRejection) -> ApiErrorResponse {
    ApiErrorResponse::invalid_body(rejection.body_text())
}
