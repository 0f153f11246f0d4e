//! Persistence ports and their adapters.
//!
//! Services talk to the repository traits below; [`PgStore`] backs them with
//! PostgreSQL and [`memory::MemoryStore`] keeps everything in process for
//! tests and `--in-memory` runs. Both adapters enforce the same uniqueness
//! and referential rules so services can rely on them as a last guard.

pub mod memory;
mod pg_applications;
mod pg_categories;
mod pg_users;
mod pg_vacatures;
pub mod pool;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::application::{Application, ApplicationHistory, ApplicationStatus};
use crate::models::category::Category;
use crate::models::user::User;
use crate::models::vacature::Vacature;

#[derive(Debug, Clone, Default)]
pub struct VacatureFilter {
    pub active: Option<bool>,
    pub archived: Option<bool>,
    pub category_id: Option<Uuid>,
    /// Case-insensitive exact match.
    pub city: Option<String>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    /// Case-insensitive substring of first name, last name or email.
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VacatureCounts {
    pub total: i64,
    pub active: i64,
    pub archived: i64,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<()>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn update_password(&self, id: Uuid, hashed_password: &str) -> Result<()>;
    async fn delete_user(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert_category(&self, category: &Category) -> Result<()>;
    async fn update_category(&self, category: &Category) -> Result<()>;
    async fn find_category(&self, id: Uuid) -> Result<Option<Category>>;
    /// Categories whose name or slug equals the given values.
    async fn find_categories_named(&self, name: &str, slug: &str) -> Result<Vec<Category>>;
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn delete_category(&self, id: Uuid) -> Result<bool>;
    async fn count_categories(&self) -> Result<i64>;
}

#[async_trait]
pub trait VacatureRepository: Send + Sync {
    async fn insert_vacature(&self, vacature: &Vacature) -> Result<()>;
    async fn update_vacature(&self, vacature: &Vacature) -> Result<()>;
    async fn find_vacature(&self, id: Uuid) -> Result<Option<Vacature>>;
    async fn find_vacature_by_slug(&self, slug: &str) -> Result<Option<Vacature>>;
    async fn find_vacature_by_number(&self, number: i32) -> Result<Option<Vacature>>;
    /// Newest first by `COALESCE(published_at, created_at)`.
    async fn list_vacatures(&self, filter: &VacatureFilter) -> Result<Vec<Vacature>>;
    /// Applications pointing at the vacancy keep existing with a null
    /// `vacature_id`.
    async fn delete_vacature(&self, id: Uuid) -> Result<bool>;
    async fn count_vacatures_in_category(&self, category_id: Uuid) -> Result<i64>;
    async fn vacature_counts(&self) -> Result<VacatureCounts>;
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn insert_application(&self, application: &Application) -> Result<()>;
    async fn find_application(&self, id: Uuid) -> Result<Option<Application>>;
    /// Newest first; returns the page and the total match count.
    async fn list_applications(&self, filter: &ApplicationFilter)
        -> Result<(Vec<Application>, i64)>;
    /// Stores the application and appends the history entries as one unit.
    async fn save_application(
        &self,
        application: &Application,
        history: &[ApplicationHistory],
    ) -> Result<()>;
    /// Oldest first.
    async fn application_history(&self, application_id: Uuid) -> Result<Vec<ApplicationHistory>>;
    /// Removes the application together with its history.
    async fn delete_application(&self, id: Uuid) -> Result<bool>;
    async fn application_status_counts(&self) -> Result<Vec<(ApplicationStatus, i64)>>;
    async fn applications_per_day(&self, since: DateTime<Utc>) -> Result<Vec<(NaiveDate, i64)>>;
}

/// PostgreSQL adapter implementing every repository port.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `ILIKE` pattern matching `term` as a literal substring. Pair it with
/// `ESCAPE '\'` in the query.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
