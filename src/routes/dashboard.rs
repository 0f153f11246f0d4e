use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{error::Result, models::user::Principal, AppState};

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Counts for the staff dashboard", body = crate::dto::dashboard_dto::DashboardStats)
    ),
    tag = "dashboard"
)]
#[axum::debug_handler]
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    _principal: Principal,
) -> Result<impl IntoResponse> {
    Ok(Json(state.dashboard_service.stats().await?))
}
