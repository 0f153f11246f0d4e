pub mod application;
pub mod auth;
pub mod category;
pub mod dashboard;
pub mod extract;
pub mod health;
pub mod pages;
pub mod user;
pub mod vacature;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::{
    doc::ApiDoc,
    error::Error,
    middleware::{auth::session_gate, cors::public_cors, rate_limit},
    AppState,
};

const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

async fn not_found() -> Error {
    Error::NotFound("Route not found".into())
}

/// Full HTTP surface. Every request passes the session gate; public routes
/// additionally share one rate limiter.
pub fn app(state: AppState) -> Router {
    let limiter = rate_limit::RateLimiter::new(state.config.public_rps);
    let cors = public_cors(state.config.frontend_origin.as_deref());

    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(pages::login_page))
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session))
        .route(
            "/api/vacatures",
            get(vacature::list_public_vacatures).post(vacature::create_vacature),
        )
        .route(
            "/api/vacatures/:id",
            get(vacature::get_public_vacature)
                .put(vacature::update_vacature)
                .delete(vacature::delete_vacature),
        )
        .route("/api/vacatures/:id/archive", post(vacature::toggle_archive))
        .route("/api/admin/vacatures", get(vacature::list_admin_vacatures))
        .route(
            "/api/applications",
            get(application::list_applications).post(application::submit_application),
        )
        .route(
            "/api/applications/:id",
            get(application::get_application)
                .patch(application::update_application)
                .delete(application::delete_application),
        )
        .route(
            "/api/categories",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/api/categories/:id",
            axum::routing::put(category::update_category).delete(category::delete_category),
        )
        .route("/api/users", get(user::list_users).post(user::create_user))
        .route("/api/users/:id", axum::routing::delete(user::delete_user))
        .route("/api/settings/password", post(user::change_password))
        .route("/api/dashboard/stats", get(dashboard::get_dashboard_stats))
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), session_gate))
        .layer(from_fn_with_state(limiter, rate_limit::public_rate_limit))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
