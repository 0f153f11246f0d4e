use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::user_dto::{ChangePasswordPayload, CreateUserPayload, UserResponse},
    error::Result,
    models::user::Principal,
    routes::extract::{ApiJson, ApiPath},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Staff accounts", body = [UserResponse]),
        (status = 403, description = "Requires ADMIN")
    ),
    tag = "users"
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse> {
    let users = state.user_service.list(&principal).await?;
    Ok(Json(
        users.into_iter().map(UserResponse::from).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 403, description = "Requires ADMIN, or SUPER_ADMIN for super admins"),
        (status = 409, description = "Email already registered")
    ),
    tag = "users"
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(payload): ApiJson<CreateUserPayload>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.create(&principal, payload).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Cannot delete yourself"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.user_service.delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/settings/password",
    request_body = ChangePasswordPayload,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Wrong current password or new password too short")
    ),
    tag = "users"
)]
#[axum::debug_handler]
pub async fn change_password(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(payload): ApiJson<ChangePasswordPayload>,
) -> Result<impl IntoResponse> {
    state
        .user_service
        .change_password(&principal, payload)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
