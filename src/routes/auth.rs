use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    config::Environment,
    dto::user_dto::{LoginPayload, LoginResponse, UserResponse},
    error::Result,
    middleware::auth::{clear_session_cookie, session_cookie},
    models::user::Principal,
    routes::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Session issued as cookie and token", body = LoginResponse),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "auth"
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> Result<impl IntoResponse> {
    let (token, user) = state.auth_service.login(payload).await?;
    let jar = CookieJar::new().add(session_cookie(
        token.clone(),
        state.auth_service.session_ttl_hours(),
        state.config.environment == Environment::Production,
    ));
    Ok((
        jar,
        Json(LoginResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cookie cleared")
    ),
    tag = "auth"
)]
#[axum::debug_handler]
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        CookieJar::new().add(clear_session_cookie()),
    )
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "The signed-in user", body = Principal),
        (status = 401, description = "No valid session")
    ),
    tag = "auth"
)]
#[axum::debug_handler]
pub async fn session(principal: Principal) -> impl IntoResponse {
    Json(principal)
}
