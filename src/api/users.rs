//! User management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        envelope::ApiResponse,
        user::{UserRequest, UserResponse},
    },
};

/// Get all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.services.users.list_all().await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.services.users.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// Add a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn add_user(
    State(state): State<crate::AppState>,
    Json(request): Json<UserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    request.validate()?;

    let user = state.services.users.add(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// Update an existing user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    request.validate()?;

    let user = state.services.users.update(id, request).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
