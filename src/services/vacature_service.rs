use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::database::{CategoryRepository, VacatureFilter, VacatureRepository};
use crate::dto::vacature_dto::VacaturePayload;
use crate::error::{Error, Result};
use crate::models::user::{Principal, Role};
use crate::models::vacature::{dedup_employment_types, Vacature};
use crate::services::access::require_role;
use crate::utils::slug::slugify;

#[derive(Clone)]
pub struct VacatureService {
    vacatures: Arc<dyn VacatureRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl VacatureService {
    pub fn new(
        vacatures: Arc<dyn VacatureRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            vacatures,
            categories,
        }
    }

    pub async fn create(&self, principal: &Principal, payload: VacaturePayload) -> Result<Vacature> {
        require_role(principal, Role::Manager)?;
        payload.validate()?;

        let slug = slugify(payload.slug.as_deref().unwrap_or(&payload.title));
        self.ensure_slug_and_number_free(&slug, payload.vacature_number, None)
            .await?;
        self.ensure_category_exists(payload.category_id).await?;

        let now = Utc::now();
        let vacature = Vacature {
            id: Uuid::new_v4(),
            title: payload.title.trim().to_string(),
            subtitle: payload.subtitle,
            slug,
            vacature_number: payload.vacature_number,
            description: payload.description,
            long_description: payload.long_description,
            seo_content: payload.seo_content,
            requirements: payload.requirements,
            benefits: payload.benefits,
            category_id: payload.category_id,
            company_name: payload.company_name,
            image_key: payload.image_key,
            employment_type: dedup_employment_types(payload.employment_type),
            city: payload.city.trim().to_string(),
            location: payload.location,
            salary: payload.salary,
            is_active: payload.is_active,
            archived: false,
            published_at: payload.published_at,
            created_at: now,
            updated_at: now,
            created_by_id: Some(principal.id),
            last_updated_by_id: Some(principal.id),
        };
        self.vacatures.insert_vacature(&vacature).await?;

        tracing::info!(
            vacature_id = %vacature.id,
            vacature_number = vacature.vacature_number,
            slug = %vacature.slug,
            "vacature created"
        );
        Ok(vacature)
    }

    /// Replaces the editable fields. The slug only changes when the payload
    /// carries one explicitly.
    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        payload: VacaturePayload,
    ) -> Result<Vacature> {
        require_role(principal, Role::Manager)?;
        payload.validate()?;

        let existing = self.get_by_id(id).await?;
        let slug = match payload.slug.as_deref() {
            Some(explicit) => slugify(explicit),
            None => existing.slug.clone(),
        };
        self.ensure_slug_and_number_free(&slug, payload.vacature_number, Some(id))
            .await?;
        self.ensure_category_exists(payload.category_id).await?;

        let vacature = Vacature {
            title: payload.title.trim().to_string(),
            subtitle: payload.subtitle,
            slug,
            vacature_number: payload.vacature_number,
            description: payload.description,
            long_description: payload.long_description,
            seo_content: payload.seo_content,
            requirements: payload.requirements,
            benefits: payload.benefits,
            category_id: payload.category_id,
            company_name: payload.company_name,
            image_key: payload.image_key,
            employment_type: dedup_employment_types(payload.employment_type),
            city: payload.city.trim().to_string(),
            location: payload.location,
            salary: payload.salary,
            is_active: payload.is_active,
            published_at: payload.published_at,
            updated_at: Utc::now(),
            last_updated_by_id: Some(principal.id),
            ..existing
        };
        self.vacatures.update_vacature(&vacature).await?;

        tracing::info!(vacature_id = %id, "vacature updated");
        Ok(vacature)
    }

    /// Flips `archived` and leaves `is_active` untouched.
    pub async fn toggle_archive(&self, principal: &Principal, id: Uuid) -> Result<Vacature> {
        require_role(principal, Role::Manager)?;
        let mut vacature = self.get_by_id(id).await?;
        vacature.archived = !vacature.archived;
        vacature.updated_at = Utc::now();
        vacature.last_updated_by_id = Some(principal.id);
        self.vacatures.update_vacature(&vacature).await?;

        tracing::info!(vacature_id = %id, archived = vacature.archived, "vacature archive toggled");
        Ok(vacature)
    }

    /// Applications that reference the vacancy survive with their
    /// `vacature_id` cleared.
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<()> {
        require_role(principal, Role::Admin)?;
        if !self.vacatures.delete_vacature(id).await? {
            return Err(Error::NotFound("Vacature not found".into()));
        }
        tracing::info!(vacature_id = %id, deleted_by = %principal.id, "vacature deleted");
        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vacature> {
        self.vacatures
            .find_vacature(id)
            .await?
            .ok_or_else(|| Error::NotFound("Vacature not found".into()))
    }

    /// Public detail lookup by internal id or slug. Inactive and archived
    /// vacancies are reported as missing.
    pub async fn get_public(&self, id_or_slug: &str) -> Result<Vacature> {
        let found = match Uuid::parse_str(id_or_slug) {
            Ok(id) => self.vacatures.find_vacature(id).await?,
            Err(_) => None,
        };
        let found = match found {
            Some(v) => Some(v),
            None => self.vacatures.find_vacature_by_slug(id_or_slug).await?,
        };
        found
            .filter(Vacature::is_publicly_visible)
            .ok_or_else(|| Error::NotFound(format!("Vacature '{}' not found", id_or_slug)))
    }

    pub async fn list(&self, filter: &VacatureFilter) -> Result<Vec<Vacature>> {
        self.vacatures.list_vacatures(filter).await
    }

    async fn ensure_slug_and_number_free(
        &self,
        slug: &str,
        number: i32,
        own_id: Option<Uuid>,
    ) -> Result<()> {
        if slug.is_empty() {
            let mut errors = validator::ValidationErrors::new();
            errors.add("slug", validator::ValidationError::new("empty_slug"));
            return Err(Error::Validation(errors));
        }
        let is_other = |v: &Vacature| Some(v.id) != own_id;

        if let Some(other) = self.vacatures.find_vacature_by_slug(slug).await? {
            if is_other(&other) {
                return Err(Error::Conflict(format!(
                    "A vacature with slug '{}' already exists",
                    slug
                )));
            }
        }
        if let Some(other) = self.vacatures.find_vacature_by_number(number).await? {
            if is_other(&other) {
                return Err(Error::Conflict(format!(
                    "A vacature with number {} already exists",
                    number
                )));
            }
        }
        Ok(())
    }

    async fn ensure_category_exists(&self, category_id: Option<Uuid>) -> Result<()> {
        if let Some(category_id) = category_id {
            if self.categories.find_category(category_id).await?.is_none() {
                return Err(Error::NotFound("Category not found".into()));
            }
        }
        Ok(())
    }
}
