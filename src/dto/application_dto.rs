use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::application::{Application, ApplicationHistory, ApplicationStatus};

/// Public submission body for `POST /api/applications`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationPayload {
    #[validate(custom(function = "crate::utils::validation::validate_not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "crate::utils::validation::validate_not_blank"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = "crate::utils::validation::validate_phone"))]
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub city: Option<String>,
    pub gender: Option<String>,
    pub experience: Option<String>,
    #[serde(default)]
    pub selected_vacatures: Vec<String>,
    #[serde(default)]
    pub availability: Vec<String>,
    /// Absent for a general application not tied to one vacancy.
    pub vacature_id: Option<Uuid>,
    pub source: Option<String>,
}

/// Staff mutation body for `PATCH /api/applications/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationPayload {
    pub status: Option<ApplicationStatus>,
    #[validate(length(max = 5000, message = "Notes are limited to 5000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationListQuery {
    pub status: Option<ApplicationStatus>,
    pub search: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListResponse {
    pub items: Vec<Application>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetailResponse {
    #[serde(flatten)]
    pub application: Application,
    pub history: Vec<ApplicationHistory>,
    /// Title of the linked vacancy while it still exists.
    pub vacature_title: Option<String>,
}
