use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::vacature_dto::{
        AdminVacatureListQuery, VacatureListQuery, VacatureListResponse, VacaturePayload,
    },
    error::Result,
    models::user::Principal,
    routes::extract::{ApiJson, ApiPath, ApiQuery},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/vacatures",
    params(
        ("active" = Option<bool>, Query, description = "Filter on the active flag"),
        ("categoryId" = Option<Uuid>, Query, description = "Filter by category"),
        ("city" = Option<String>, Query, description = "Case-insensitive city match")
    ),
    responses(
        (status = 200, description = "Active, non-archived vacatures, newest first", body = VacatureListResponse),
        (status = 400, description = "Invalid filter value")
    ),
    tag = "vacatures"
)]
#[axum::debug_handler]
pub async fn list_public_vacatures(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<VacatureListQuery>,
) -> Result<impl IntoResponse> {
    let items = match query.to_filter()? {
        Some(filter) => state.vacature_service.list(&filter).await?,
        None => Vec::new(),
    };
    Ok(Json(VacatureListResponse::from(items)))
}

#[utoipa::path(
    get,
    path = "/api/vacatures/{id}",
    params(
        ("id" = String, Path, description = "Vacature ID or slug")
    ),
    responses(
        (status = 200, description = "Vacature found", body = crate::models::vacature::Vacature),
        (status = 404, description = "Vacature not found, inactive or archived")
    ),
    tag = "vacatures"
)]
#[axum::debug_handler]
pub async fn get_public_vacature(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<impl IntoResponse> {
    let vacature = state.vacature_service.get_public(&id).await?;
    Ok(Json(vacature))
}

#[utoipa::path(
    get,
    path = "/api/admin/vacatures",
    params(
        ("active" = Option<bool>, Query, description = "Filter on the active flag"),
        ("archived" = Option<bool>, Query, description = "Filter on the archive flag"),
        ("categoryId" = Option<Uuid>, Query, description = "Filter by category"),
        ("city" = Option<String>, Query, description = "Case-insensitive city match"),
        ("search" = Option<String>, Query, description = "Title substring")
    ),
    responses(
        (status = 200, description = "All vacatures matching the filters", body = VacatureListResponse),
        (status = 401, description = "No session")
    ),
    tag = "vacatures"
)]
#[axum::debug_handler]
pub async fn list_admin_vacatures(
    State(state): State<AppState>,
    _principal: Principal,
    ApiQuery(query): ApiQuery<AdminVacatureListQuery>,
) -> Result<impl IntoResponse> {
    let filter = query.to_filter()?;
    let items = state.vacature_service.list(&filter).await?;
    Ok(Json(VacatureListResponse::from(items)))
}

#[utoipa::path(
    post,
    path = "/api/vacatures",
    request_body = VacaturePayload,
    responses(
        (status = 201, description = "Vacature created", body = crate::models::vacature::Vacature),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown category"),
        (status = 409, description = "Slug or vacature number already in use")
    ),
    tag = "vacatures"
)]
#[axum::debug_handler]
pub async fn create_vacature(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(payload): ApiJson<VacaturePayload>,
) -> Result<impl IntoResponse> {
    let vacature = state.vacature_service.create(&principal, payload).await?;
    Ok((StatusCode::CREATED, Json(vacature)))
}

#[utoipa::path(
    put,
    path = "/api/vacatures/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacature ID")
    ),
    request_body = VacaturePayload,
    responses(
        (status = 200, description = "Vacature updated", body = crate::models::vacature::Vacature),
        (status = 404, description = "Vacature not found"),
        (status = 409, description = "Slug or vacature number already in use")
    ),
    tag = "vacatures"
)]
#[axum::debug_handler]
pub async fn update_vacature(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<VacaturePayload>,
) -> Result<impl IntoResponse> {
    let vacature = state.vacature_service.update(&principal, id, payload).await?;
    Ok(Json(vacature))
}

#[utoipa::path(
    post,
    path = "/api/vacatures/{id}/archive",
    params(
        ("id" = Uuid, Path, description = "Vacature ID")
    ),
    responses(
        (status = 200, description = "Archive flag flipped", body = crate::models::vacature::Vacature),
        (status = 404, description = "Vacature not found")
    ),
    tag = "vacatures"
)]
#[axum::debug_handler]
pub async fn toggle_archive(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let vacature = state.vacature_service.toggle_archive(&principal, id).await?;
    Ok(Json(vacature))
}

#[utoipa::path(
    delete,
    path = "/api/vacatures/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacature ID")
    ),
    responses(
        (status = 204, description = "Vacature deleted, applications kept"),
        (status = 403, description = "Requires ADMIN"),
        (status = 404, description = "Vacature not found")
    ),
    tag = "vacatures"
)]
#[axum::debug_handler]
pub async fn delete_vacature(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.vacature_service.delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
