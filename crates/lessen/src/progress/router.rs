use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use chrono::{DateTime, Local, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ArticleSnapshot, TaskSnapshot, TimeContext};
use super::repository::ProgressRepository;
use super::service::{ProgressService, ProgressServiceError};
use crate::identity::UserId;

/// Router builder exposing HTTP endpoints for progress tracking.
pub fn progress_router<R>(service: Arc<ProgressService<R>>) -> Router
where
    R: ProgressRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/users/:user_id/progress",
            get(snapshot_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/progress/tasks",
            post(complete_task_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/progress/tasks/:task_id",
            delete(uncomplete_task_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/progress/articles",
            post(read_article_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/progress/articles/:article_id",
            delete(unread_article_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/progress/rooms",
            post(transform_room_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompleteTaskRequest {
    pub(crate) task: TaskSnapshot,
    /// Completion timestamp; defaults to now.
    #[serde(default)]
    pub(crate) at: Option<DateTime<Utc>>,
    /// Bonus window override; derived from the timestamp when absent.
    #[serde(default)]
    pub(crate) time_context: Option<TimeContext>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReadArticleRequest {
    pub(crate) article: ArticleSnapshot,
    #[serde(default)]
    pub(crate) at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct TransformRoomRequest {
    #[serde(default)]
    pub(crate) at: Option<DateTime<Utc>>,
}

fn resolve_moment(at: Option<DateTime<Utc>>) -> DateTime<Utc> {
    at.unwrap_or_else(Utc::now)
}

/// Bonus window for an award request. Live requests (no explicit timestamp)
/// derive the window from the wall clock; backfilled requests carry their own
/// context or get none, so replays stay reproducible.
fn resolve_time_context(
    explicit_at: Option<DateTime<Utc>>,
    requested: Option<TimeContext>,
) -> Option<TimeContext> {
    if requested.is_some() {
        return requested;
    }
    if explicit_at.is_some() {
        return None;
    }
    TimeContext::from_local(Local::now().naive_local())
}

fn error_response(error: ProgressServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    let status = match error {
        ProgressServiceError::AwardNotFound { .. } => StatusCode::NOT_FOUND,
        ProgressServiceError::Repository(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn complete_task_handler<R>(
    State(service): State<Arc<ProgressService<R>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<CompleteTaskRequest>,
) -> Response
where
    R: ProgressRepository + 'static,
{
    let user_id = UserId(user_id);
    let at = resolve_moment(request.at);
    let time_context = resolve_time_context(request.at, request.time_context);

    match service.complete_task(&user_id, &request.task, at, time_context) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn uncomplete_task_handler<R>(
    State(service): State<Arc<ProgressService<R>>>,
    Path((user_id, task_id)): Path<(String, String)>,
) -> Response
where
    R: ProgressRepository + 'static,
{
    let user_id = UserId(user_id);
    match service.uncomplete_task(&user_id, &task_id, Utc::now()) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn read_article_handler<R>(
    State(service): State<Arc<ProgressService<R>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<ReadArticleRequest>,
) -> Response
where
    R: ProgressRepository + 'static,
{
    let user_id = UserId(user_id);
    let at = resolve_moment(request.at);

    match service.read_article(&user_id, &request.article, at) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn unread_article_handler<R>(
    State(service): State<Arc<ProgressService<R>>>,
    Path((user_id, article_id)): Path<(String, String)>,
) -> Response
where
    R: ProgressRepository + 'static,
{
    let user_id = UserId(user_id);
    match service.unread_article(&user_id, &article_id, Utc::now()) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn transform_room_handler<R>(
    State(service): State<Arc<ProgressService<R>>>,
    Path(user_id): Path<String>,
    request: Option<axum::Json<TransformRoomRequest>>,
) -> Response
where
    R: ProgressRepository + 'static,
{
    let user_id = UserId(user_id);
    let at = resolve_moment(request.and_then(|body| body.0.at));

    match service.transform_room(&user_id, at) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn snapshot_handler<R>(
    State(service): State<Arc<ProgressService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ProgressRepository + 'static,
{
    let user_id = UserId(user_id);
    match service.snapshot(&user_id, Utc::now()) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}
