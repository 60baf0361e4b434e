use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::errors::{status_for, ApiError};
use crate::application::dto::{CreateUserRequest, UpdateUserRequest};
use crate::application::result::OperationResult;
use crate::application::user_usecase::UserUseCase;

/// Default and maximum page sizes for the list endpoint
const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;

/// Shared state handed to every handler
///
/// Built once in `main` (explicit composition root, no lazy globals) and
/// cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub use_case: Arc<UserUseCase>,
}

/// Builds the user routes on top of the shared state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/by-email/:email", get(get_user_by_email))
        .route("/api/users/:id/permissions/:action", get(check_permission))
        .route("/health", get(health_check))
        .fallback(unknown_route)
        .with_state(state)
}

async fn unknown_route() -> ApiError {
    ApiError::not_found("Resource not found")
}

/// Serializes an operation result with its mapped status code
fn envelope<T: Serialize>(result: OperationResult<T>) -> Response {
    (status_for(result.kind), Json(result)).into_response()
}

/// Create a new user
///
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Response {
    envelope(state.use_case.create_user(req).await)
}

/// Get a user by ID
///
/// GET /api/users/:id
pub async fn get_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    envelope(state.use_case.get_user(id).await)
}

/// Get a user by email address
///
/// GET /api/users/by-email/:email
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Response {
    envelope(state.use_case.get_user_by_email(&email).await)
}

/// Query parameters for the list endpoint
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

/// List users with pagination
///
/// GET /api/users?skip=0&limit=10
pub async fn list_users(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    envelope(state.use_case.list_users(skip, limit).await)
}

/// Apply a partial update to a user
///
/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Response {
    envelope(state.use_case.update_user(id, req).await)
}

/// Delete a user
///
/// DELETE /api/users/:id
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    envelope(state.use_case.delete_user(id).await)
}

/// Check whether a user may perform an action
///
/// GET /api/users/:id/permissions/:action
pub async fn check_permission(
    State(state): State<AppState>,
    Path((id, action)): Path<(Uuid, String)>,
) -> Response {
    envelope(state.use_case.check_permission(id, &action).await)
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
