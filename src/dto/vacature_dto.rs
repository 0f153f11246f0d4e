use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::database::VacatureFilter;
use crate::error::{Error, Result};
use crate::models::vacature::{EmploymentType, Vacature};

fn validate_positive_decimal(value: &Decimal) -> std::result::Result<(), ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positive"))
    }
}

/// Body for both `POST /api/vacatures` and `PUT /api/vacatures/{id}`. A PUT
/// replaces every editable field; `slug` left out keeps the current slug.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VacaturePayload {
    #[validate(custom(function = "crate::utils::validation::validate_not_blank"))]
    pub title: String,
    pub subtitle: Option<String>,
    /// Overrides the slug derived from the title.
    pub slug: Option<String>,
    #[validate(range(min = 1, message = "Vacature number must be a positive integer"))]
    pub vacature_number: i32,
    #[validate(custom(function = "crate::utils::validation::validate_not_blank"))]
    pub description: String,
    pub long_description: Option<String>,
    pub seo_content: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub category_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub image_key: Option<String>,
    #[serde(default)]
    pub employment_type: Vec<EmploymentType>,
    #[validate(custom(function = "crate::utils::validation::validate_not_blank"))]
    pub city: String,
    pub location: Option<String>,
    #[validate(custom(function = "validate_positive_decimal"))]
    #[schema(value_type = Option<f64>)]
    pub salary: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub published_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Query for the public listing. Values arrive as raw strings so that an
/// empty parameter (`?active=`) means "no filter" instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VacatureListQuery {
    pub active: Option<String>,
    pub category_id: Option<String>,
    pub city: Option<String>,
}

/// Staff listing: the public filters plus archive state and title search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdminVacatureListQuery {
    pub active: Option<String>,
    pub archived: Option<String>,
    pub category_id: Option<String>,
    pub city: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacatureListResponse {
    pub items: Vec<Vacature>,
    pub total: usize,
}

impl From<Vec<Vacature>> for VacatureListResponse {
    fn from(items: Vec<Vacature>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}

fn non_empty(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_bool(name: &str, raw: &Option<String>) -> Result<Option<bool>> {
    match non_empty(raw) {
        None => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(Some(true)),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(Some(false)),
        Some(v) => Err(Error::BadRequest(format!("Invalid value for {}: {}", name, v))),
    }
}

fn parse_uuid(name: &str, raw: &Option<String>) -> Result<Option<Uuid>> {
    non_empty(raw)
        .map(|v| {
            Uuid::parse_str(v)
                .map_err(|_| Error::BadRequest(format!("Invalid value for {}: {}", name, v)))
        })
        .transpose()
}

impl VacatureListQuery {
    /// Public listings only ever hold active, non-archived vacancies.
    /// `Ok(None)` means the query cannot match anything (`active=false`).
    pub fn to_filter(&self) -> Result<Option<VacatureFilter>> {
        if parse_bool("active", &self.active)? == Some(false) {
            return Ok(None);
        }
        Ok(Some(VacatureFilter {
            active: Some(true),
            archived: Some(false),
            category_id: parse_uuid("categoryId", &self.category_id)?,
            city: non_empty(&self.city).map(str::to_string),
            search: None,
        }))
    }
}

impl AdminVacatureListQuery {
    pub fn to_filter(&self) -> Result<VacatureFilter> {
        Ok(VacatureFilter {
            active: parse_bool("active", &self.active)?,
            archived: parse_bool("archived", &self.archived)?,
            category_id: parse_uuid("categoryId", &self.category_id)?,
            city: non_empty(&self.city).map(str::to_string),
            search: non_empty(&self.search).map(str::to_string),
        })
    }
}
