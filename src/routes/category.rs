use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::category_dto::CategoryPayload,
    error::Result,
    models::user::Principal,
    routes::extract::{ApiJson, ApiPath},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories by name", body = [crate::models::category::Category])
    ),
    tag = "categories"
)]
#[axum::debug_handler]
pub async fn list_categories(
    State(state): State<AppState>,
    _principal: Principal,
) -> Result<impl IntoResponse> {
    Ok(Json(state.category_service.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Category created", body = crate::models::category::Category),
        (status = 403, description = "Requires ADMIN"),
        (status = 409, description = "Name or slug already in use")
    ),
    tag = "categories"
)]
#[axum::debug_handler]
pub async fn create_category(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(payload): ApiJson<CategoryPayload>,
) -> Result<impl IntoResponse> {
    let category = state.category_service.create(&principal, payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Category updated", body = crate::models::category::Category),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
#[axum::debug_handler]
pub async fn update_category(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<CategoryPayload>,
) -> Result<impl IntoResponse> {
    let category = state
        .category_service
        .update(&principal, id, payload)
        .await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 409, description = "Category still used by vacatures")
    ),
    tag = "categories"
)]
#[axum::debug_handler]
pub async fn delete_category(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.category_service.delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
