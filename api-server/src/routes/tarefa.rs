//! Tarefa API endpoints
//!
//! RESTful API for task CRUD operations under `/Tarefa`.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use organizador_core::task::{
    date_format, sentinel_date, Task, TaskFilter, TaskId, TaskPayload, TaskRepository, TaskStatus,
};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    #[serde(default)]
    pub titulo: String,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    #[serde(default = "sentinel_date", deserialize_with = "date_format::deserialize")]
    pub data: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: TaskStatus,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "Erro")]
    pub error: String,
}

pub enum RouteError {
    /// 404 with an empty body
    NotFound,
    BadRequest(String),
    /// 500 with a fixed message; the cause is only logged
    Internal,
}

pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno";

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
            }
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: INTERNAL_ERROR_MESSAGE.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

impl From<organizador_core::Error> for RouteError {
    fn from(err: organizador_core::Error) -> Self {
        use organizador_core::Error;

        match err {
            Error::TaskNotFound(_) => Self::NotFound,
            Error::InvalidInput(msg) => Self::BadRequest(msg),
            other => {
                error!("Task store failure: {}", other);
                Self::Internal
            }
        }
    }
}

type Created = (StatusCode, [(HeaderName, String); 1], Json<Task>);

// ============================================================================
// Handlers
// ============================================================================

/// GET /Tarefa/{id} - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<Task>, RouteError> {
    find_task(state.task_store(), id).await.map(Json)
}

/// GET /Tarefa/ObterTodos - List all tasks
async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Task>>, RouteError> {
    list_matching(&state, TaskFilter::All).await
}

/// GET /Tarefa/ObterPorTitulo?titulo= - Tasks whose title contains the text
async fn list_by_title(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> Result<Json<Vec<Task>>, RouteError> {
    list_matching(&state, TaskFilter::TitleContains(query.titulo)).await
}

/// GET /Tarefa/ObterPorData?data= - Tasks dated on the given day
async fn list_by_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Task>>, RouteError> {
    list_matching(&state, TaskFilter::Date(query.data.date())).await
}

/// GET /Tarefa/ObterPorStatus?status= - Tasks in the given status
async fn list_by_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Task>>, RouteError> {
    list_matching(&state, TaskFilter::Status(query.status)).await
}

/// POST /Tarefa - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<TaskPayload>,
) -> Result<Created, RouteError> {
    payload.validate()?;

    let created = state.task_store().create(payload).await?;
    info!("Task {} created via API", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/Tarefa/{}", created.id))],
        Json(created),
    ))
}

/// PUT /Tarefa/{id} - Replace a task's title, description, date and status
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<Task>, RouteError> {
    // Lookup comes first: a missing id is 404 even for an invalid body.
    let mut task = find_task(state.task_store(), id).await?;
    payload.validate()?;

    task.apply(payload);
    let updated = state.task_store().update(task).await?;

    Ok(Json(updated))
}

/// DELETE /Tarefa/{id} - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<StatusCode, RouteError> {
    if state.task_store().delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(RouteError::NotFound)
    }
}

// ============================================================================
// Helpers
// ============================================================================

async fn find_task(store: &dyn TaskRepository, id: TaskId) -> Result<Task, RouteError> {
    store.get(id).await?.ok_or(RouteError::NotFound)
}

async fn list_matching(
    state: &AppState,
    filter: TaskFilter,
) -> Result<Json<Vec<Task>>, RouteError> {
    let tasks = state.task_store().list(&filter).await?;
    Ok(Json(tasks))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/Tarefa", post(create_task))
        .route("/Tarefa/ObterTodos", get(list_all))
        .route("/Tarefa/ObterPorTitulo", get(list_by_title))
        .route("/Tarefa/ObterPorData", get(list_by_date))
        .route("/Tarefa/ObterPorStatus", get(list_by_status))
        .route(
            "/Tarefa/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}
