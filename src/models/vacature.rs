use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgHasArrayType, PgTypeInfo};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "employment_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Freelance,
    Temporary,
    Internship,
}

impl PgHasArrayType for EmploymentType {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_employment_type")
    }
}

/// Drops repeated employment types, keeping the first occurrence of each.
pub fn dedup_employment_types(types: Vec<EmploymentType>) -> Vec<EmploymentType> {
    let mut seen = Vec::with_capacity(types.len());
    for kind in types {
        if !seen.contains(&kind) {
            seen.push(kind);
        }
    }
    seen
}

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vacature {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub slug: String,
    pub vacature_number: i32,
    pub description: String,
    pub long_description: Option<String>,
    pub seo_content: Option<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub category_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub image_key: Option<String>,
    pub employment_type: Vec<EmploymentType>,
    pub city: String,
    pub location: Option<String>,
    pub salary: Option<Decimal>,
    pub is_active: bool,
    pub archived: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by_id: Option<Uuid>,
    pub last_updated_by_id: Option<Uuid>,
}

impl Vacature {
    /// Only active, non-archived vacancies are served to the public.
    pub fn is_publicly_visible(&self) -> bool {
        self.is_active && !self.archived
    }

    /// Sort key for newest-first listings.
    pub fn recency(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.created_at)
    }
}
