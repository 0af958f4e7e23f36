//! User controller.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use roster_core::{RosterError, UserId};
use roster_service::{CreateUserRequest, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/", post(create_user))
        .route("/user", post(create_user))
        .route("/user/:user_id", get(get_user))
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/user/",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 422, description = "Invalid request body", body = roster_core::ErrorResponse),
        (status = 500, description = "Storage failure", body = roster_core::ErrorResponse),
        (status = 503, description = "Storage timed out", body = roster_core::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Create user request: {}", request.name);

    let response = state.user_service.create_user(request).await?;
    ok(response)
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = "users",
    params(
        ("user_id" = i64, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = roster_core::ErrorResponse),
        (status = 422, description = "Identifier is not an integer", body = roster_core::ErrorResponse),
        (status = 500, description = "Storage failure", body = roster_core::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", user_id);

    let user_id = parse_user_id(&user_id)?;

    let response = state.user_service.get_user(user_id).await?;
    ok(response)
}

fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id).map_err(|_| AppError(RosterError::validation(format!("Invalid user ID: {}", id))))
}
