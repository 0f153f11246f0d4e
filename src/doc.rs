//! OpenAPI document served at `/api/openapi.json`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::dto::{
    application_dto::{
        ApplicationDetailResponse, ApplicationListResponse, SubmitApplicationPayload,
        UpdateApplicationPayload,
    },
    category_dto::CategoryPayload,
    dashboard_dto::{DailyCount, DashboardStats},
    user_dto::{ChangePasswordPayload, CreateUserPayload, LoginPayload, LoginResponse, UserResponse},
    vacature_dto::{VacatureListResponse, VacaturePayload},
};
use crate::models::{
    application::{Application, ApplicationHistory, ApplicationStatus, HistoryType},
    category::Category,
    user::{Principal, Role},
    vacature::{EmploymentType, Vacature},
};

struct SessionAddon;

impl Modify for SessionAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session_token",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionAddon),
    info(
        title = "Vacature backend API",
        description = "Public vacancy listings, application intake and the staff back office."
    ),
    paths(
        crate::routes::health::health,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::session,
        crate::routes::vacature::list_public_vacatures,
        crate::routes::vacature::get_public_vacature,
        crate::routes::vacature::list_admin_vacatures,
        crate::routes::vacature::create_vacature,
        crate::routes::vacature::update_vacature,
        crate::routes::vacature::toggle_archive,
        crate::routes::vacature::delete_vacature,
        crate::routes::application::submit_application,
        crate::routes::application::list_applications,
        crate::routes::application::get_application,
        crate::routes::application::update_application,
        crate::routes::application::delete_application,
        crate::routes::category::list_categories,
        crate::routes::category::create_category,
        crate::routes::category::update_category,
        crate::routes::category::delete_category,
        crate::routes::user::list_users,
        crate::routes::user::create_user,
        crate::routes::user::delete_user,
        crate::routes::user::change_password,
        crate::routes::dashboard::get_dashboard_stats,
    ),
    components(schemas(
        Vacature, EmploymentType, VacaturePayload, VacatureListResponse,
        Application, ApplicationStatus, ApplicationHistory, HistoryType,
        SubmitApplicationPayload, UpdateApplicationPayload,
        ApplicationListResponse, ApplicationDetailResponse,
        Category, CategoryPayload,
        Role, Principal, UserResponse, CreateUserPayload, ChangePasswordPayload,
        LoginPayload, LoginResponse,
        DashboardStats, DailyCount,
    )),
    tags(
        (name = "vacatures", description = "Vacancy listings and lifecycle"),
        (name = "applications", description = "Application intake and workflow"),
        (name = "categories", description = "Vacancy categories"),
        (name = "users", description = "Staff accounts and passwords"),
        (name = "dashboard", description = "Back-office statistics"),
        (name = "auth", description = "Sessions"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
