//! User registration and listing controller.

use crate::{
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use nimbus_service::{RegisterUserRequest, UserListResponse, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_users).post(register_user))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All registered users", body = UserListResponse),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<UserListResponse> {
    debug!("List users request");

    let response = state.user_service.list_users().await?;
    ok(response)
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid request or under-age registration"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    debug!("Register user request: {}", request.email);

    let response = state.user_service.register_user(request).await?;
    Ok(created(response))
}
