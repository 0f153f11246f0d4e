use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    ApplicationFilter, ApplicationRepository, CategoryRepository, UserRepository, VacatureCounts,
    VacatureFilter, VacatureRepository,
};
use crate::error::{foreign_key_error, Error, Result, APPLICATION_VACATURE_FKEY};
use crate::models::application::{Application, ApplicationHistory, ApplicationStatus};
use crate::models::category::Category;
use crate::models::user::User;
use crate::models::vacature::Vacature;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    categories: HashMap<Uuid, Category>,
    vacatures: HashMap<Uuid, Vacature>,
    applications: HashMap<Uuid, Application>,
    history: Vec<ApplicationHistory>,
}

impl Tables {
    fn check_vacature_unique(&self, v: &Vacature) -> Result<()> {
        for other in self.vacatures.values().filter(|o| o.id != v.id) {
            if other.slug == v.slug {
                return Err(Error::Conflict(
                    "Duplicate value violates vacatures_slug_key".into(),
                ));
            }
            if other.vacature_number == v.vacature_number {
                return Err(Error::Conflict(
                    "Duplicate value violates vacatures_vacature_number_key".into(),
                ));
            }
        }
        Ok(())
    }

    fn check_category_unique(&self, c: &Category) -> Result<()> {
        let clash = self
            .categories
            .values()
            .any(|o| o.id != c.id && (o.name == c.name || o.slug == c.slug));
        if clash {
            return Err(Error::Conflict(
                "Duplicate value violates categories_name_key".into(),
            ));
        }
        Ok(())
    }

    fn check_category_exists(&self, category_id: Option<Uuid>) -> Result<()> {
        match category_id {
            Some(id) if !self.categories.contains_key(&id) => Err(Error::Conflict(
                "Record is still referenced (vacatures_category_id_fkey)".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// In-process store mirroring the PostgreSQL constraints: unique keys,
/// `ON DELETE SET NULL` for applications pointing at a deleted vacancy,
/// `ON DELETE CASCADE` for history and `RESTRICT` for referenced categories.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(Error::Conflict("Duplicate value violates users_email_key".into()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update_password(&self, id: Uuid, hashed_password: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.get_mut(&id) {
            user.hashed_password = hashed_password.to_string();
        }
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.users.remove(&id).is_some();
        if removed {
            for v in tables.vacatures.values_mut() {
                if v.created_by_id == Some(id) {
                    v.created_by_id = None;
                }
                if v.last_updated_by_id == Some(id) {
                    v.last_updated_by_id = None;
                }
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn insert_category(&self, category: &Category) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.check_category_unique(category)?;
        tables.categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.check_category_unique(category)?;
        if tables.categories.contains_key(&category.id) {
            tables.categories.insert(category.id, category.clone());
        }
        Ok(())
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn find_categories_named(&self, name: &str, slug: &str) -> Result<Vec<Category>> {
        let tables = self.tables.read().await;
        let name = name.to_lowercase();
        Ok(tables
            .categories
            .values()
            .filter(|c| c.name.to_lowercase() == name || c.slug == slug)
            .cloned()
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.vacatures.values().any(|v| v.category_id == Some(id)) {
            return Err(Error::Conflict(
                "Record is still referenced (vacatures_category_id_fkey)".into(),
            ));
        }
        Ok(tables.categories.remove(&id).is_some())
    }

    async fn count_categories(&self) -> Result<i64> {
        Ok(self.tables.read().await.categories.len() as i64)
    }
}

#[async_trait]
impl VacatureRepository for MemoryStore {
    async fn insert_vacature(&self, vacature: &Vacature) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.check_vacature_unique(vacature)?;
        tables.check_category_exists(vacature.category_id)?;
        tables.vacatures.insert(vacature.id, vacature.clone());
        Ok(())
    }

    async fn update_vacature(&self, vacature: &Vacature) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.check_vacature_unique(vacature)?;
        tables.check_category_exists(vacature.category_id)?;
        if let Some(existing) = tables.vacatures.get_mut(&vacature.id) {
            let created_by_id = existing.created_by_id;
            let created_at = existing.created_at;
            *existing = vacature.clone();
            existing.created_by_id = created_by_id;
            existing.created_at = created_at;
        }
        Ok(())
    }

    async fn find_vacature(&self, id: Uuid) -> Result<Option<Vacature>> {
        Ok(self.tables.read().await.vacatures.get(&id).cloned())
    }

    async fn find_vacature_by_slug(&self, slug: &str) -> Result<Option<Vacature>> {
        let tables = self.tables.read().await;
        Ok(tables.vacatures.values().find(|v| v.slug == slug).cloned())
    }

    async fn find_vacature_by_number(&self, number: i32) -> Result<Option<Vacature>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vacatures
            .values()
            .find(|v| v.vacature_number == number)
            .cloned())
    }

    async fn list_vacatures(&self, filter: &VacatureFilter) -> Result<Vec<Vacature>> {
        let tables = self.tables.read().await;
        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut items: Vec<Vacature> = tables
            .vacatures
            .values()
            .filter(|v| filter.active.map_or(true, |a| v.is_active == a))
            .filter(|v| filter.archived.map_or(true, |a| v.archived == a))
            .filter(|v| filter.category_id.map_or(true, |c| v.category_id == Some(c)))
            .filter(|v| {
                filter
                    .city
                    .as_ref()
                    .map_or(true, |city| v.city.to_lowercase() == city.to_lowercase())
            })
            .filter(|v| search.as_ref().map_or(true, |s| contains_ci(&v.title, s)))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.recency().cmp(&a.recency()));
        Ok(items)
    }

    async fn delete_vacature(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.vacatures.remove(&id).is_some();
        if removed {
            for application in tables.applications.values_mut() {
                if application.vacature_id == Some(id) {
                    application.vacature_id = None;
                }
            }
        }
        Ok(removed)
    }

    async fn count_vacatures_in_category(&self, category_id: Uuid) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .vacatures
            .values()
            .filter(|v| v.category_id == Some(category_id))
            .count() as i64)
    }

    async fn vacature_counts(&self) -> Result<VacatureCounts> {
        let tables = self.tables.read().await;
        let mut counts = VacatureCounts::default();
        for v in tables.vacatures.values() {
            counts.total += 1;
            if v.archived {
                counts.archived += 1;
            } else if v.is_active {
                counts.active += 1;
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn insert_application(&self, application: &Application) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(vacature_id) = application.vacature_id {
            if !tables.vacatures.contains_key(&vacature_id) {
                return Err(foreign_key_error(Some(APPLICATION_VACATURE_FKEY)));
            }
        }
        tables
            .applications
            .insert(application.id, application.clone());
        Ok(())
    }

    async fn find_application(&self, id: Uuid) -> Result<Option<Application>> {
        Ok(self.tables.read().await.applications.get(&id).cloned())
    }

    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<(Vec<Application>, i64)> {
        let tables = self.tables.read().await;
        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut matches: Vec<&Application> = tables
            .applications
            .values()
            .filter(|a| filter.status.map_or(true, |s| a.status == s))
            .filter(|a| {
                search.as_ref().map_or(true, |s| {
                    contains_ci(&a.first_name, s)
                        || contains_ci(&a.last_name, s)
                        || contains_ci(&a.email, s)
                })
            })
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matches.len() as i64;
        let offset = usize::try_from(filter.offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.limit.max(0)).unwrap_or(usize::MAX);
        let page = matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn save_application(
        &self,
        application: &Application,
        history: &[ApplicationHistory],
    ) -> Result<()> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.applications.get_mut(&application.id) else {
            return Err(Error::NotFound("Application not found".into()));
        };
        stored.status = application.status;
        stored.notes = application.notes.clone();
        stored.updated_at = application.updated_at;
        tables.history.extend_from_slice(history);
        Ok(())
    }

    async fn application_history(&self, application_id: Uuid) -> Result<Vec<ApplicationHistory>> {
        let tables = self.tables.read().await;
        let mut entries: Vec<ApplicationHistory> = tables
            .history
            .iter()
            .filter(|h| h.application_id == application_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(entries)
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.applications.remove(&id).is_some();
        if removed {
            tables.history.retain(|h| h.application_id != id);
        }
        Ok(removed)
    }

    async fn application_status_counts(&self) -> Result<Vec<(ApplicationStatus, i64)>> {
        let tables = self.tables.read().await;
        let mut counts: HashMap<ApplicationStatus, i64> = HashMap::new();
        for application in tables.applications.values() {
            *counts.entry(application.status).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn applications_per_day(&self, since: DateTime<Utc>) -> Result<Vec<(NaiveDate, i64)>> {
        let tables = self.tables.read().await;
        let mut per_day: HashMap<NaiveDate, i64> = HashMap::new();
        for application in tables.applications.values() {
            if application.created_at >= since {
                *per_day.entry(application.created_at.date_naive()).or_default() += 1;
            }
        }
        let mut rows: Vec<(NaiveDate, i64)> = per_day.into_iter().collect();
        rows.sort_by_key(|(day, _)| *day);
        Ok(rows)
    }
}
