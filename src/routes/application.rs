use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::application_dto::{
        ApplicationListQuery, SubmitApplicationPayload, UpdateApplicationPayload,
    },
    error::Result,
    models::user::Principal,
    routes::extract::{ApiJson, ApiPath, ApiQuery},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = SubmitApplicationPayload,
    responses(
        (status = 201, description = "Application received", body = crate::models::application::Application),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown vacature")
    ),
    tag = "applications"
)]
#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SubmitApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.submit(payload).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/api/applications",
    params(
        ("status" = Option<crate::models::application::ApplicationStatus>, Query, description = "Filter by status"),
        ("search" = Option<String>, Query, description = "Name or email substring"),
        ("page" = Option<i64>, Query, description = "Page number, 10 per page")
    ),
    responses(
        (status = 200, description = "One page of applications, newest first", body = crate::dto::application_dto::ApplicationListResponse)
    ),
    tag = "applications"
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    principal: Principal,
    ApiQuery(query): ApiQuery<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.application_service.list(&principal, query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application with history", body = crate::dto::application_dto::ApplicationDetailResponse),
        (status = 404, description = "Application not found")
    ),
    tag = "applications"
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let detail = state.application_service.get(&principal, id).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationPayload,
    responses(
        (status = 200, description = "Application updated", body = crate::dto::application_dto::ApplicationDetailResponse),
        (status = 404, description = "Application not found")
    ),
    tag = "applications"
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let detail = state
        .application_service
        .update(&principal, id, payload)
        .await?;
    Ok(Json(detail))
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 204, description = "Application and history deleted"),
        (status = 404, description = "Application not found")
    ),
    tag = "applications"
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.application_service.delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
