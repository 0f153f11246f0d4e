use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::database::{CategoryRepository, VacatureRepository};
use crate::dto::category_dto::CategoryPayload;
use crate::error::{Error, Result};
use crate::models::category::Category;
use crate::models::user::{Principal, Role};
use crate::services::access::require_role;
use crate::utils::slug::slugify;

#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    vacatures: Arc<dyn VacatureRepository>,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        vacatures: Arc<dyn VacatureRepository>,
    ) -> Self {
        Self {
            categories,
            vacatures,
        }
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        self.categories.list_categories().await
    }

    pub async fn create(&self, principal: &Principal, payload: CategoryPayload) -> Result<Category> {
        require_role(principal, Role::Admin)?;
        payload.validate()?;

        let name = payload.name.trim().to_string();
        let slug = slugify(&name);
        self.ensure_unique(&name, &slug, None).await?;

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name,
            slug,
            description: payload.description,
            color: payload.color,
            icon: payload.icon,
            is_active: payload.is_active,
            created_at: now,
            updated_at: now,
        };
        self.categories.insert_category(&category).await?;
        tracing::info!(category_id = %category.id, slug = %category.slug, "category created");
        Ok(category)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        payload: CategoryPayload,
    ) -> Result<Category> {
        require_role(principal, Role::Admin)?;
        payload.validate()?;

        let existing = self
            .categories
            .find_category(id)
            .await?
            .ok_or_else(|| Error::NotFound("Category not found".into()))?;
        let name = payload.name.trim().to_string();
        let slug = slugify(&name);
        self.ensure_unique(&name, &slug, Some(id)).await?;

        let category = Category {
            name,
            slug,
            description: payload.description,
            color: payload.color,
            icon: payload.icon,
            is_active: payload.is_active,
            updated_at: Utc::now(),
            ..existing
        };
        self.categories.update_category(&category).await?;
        tracing::info!(category_id = %id, "category updated");
        Ok(category)
    }

    /// Refused while any vacancy still points at the category.
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<()> {
        require_role(principal, Role::Admin)?;

        let in_use = self.vacatures.count_vacatures_in_category(id).await?;
        if in_use > 0 {
            return Err(Error::Conflict(format!(
                "Category is used by {} vacature(s) and cannot be deleted",
                in_use
            )));
        }
        if !self.categories.delete_category(id).await? {
            return Err(Error::NotFound("Category not found".into()));
        }
        tracing::info!(category_id = %id, "category deleted");
        Ok(())
    }

    async fn ensure_unique(&self, name: &str, slug: &str, own_id: Option<Uuid>) -> Result<()> {
        if slug.is_empty() {
            let mut errors = validator::ValidationErrors::new();
            errors.add("name", validator::ValidationError::new("empty_slug"));
            return Err(Error::Validation(errors));
        }
        let clashes = self.categories.find_categories_named(name, slug).await?;
        if clashes.iter().any(|c| Some(c.id) != own_id) {
            return Err(Error::Conflict(format!(
                "A category named '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::dto::vacature_dto::VacaturePayload;
    use crate::services::vacature_service::VacatureService;
    use serde_json::json;

    fn principal(role: Role) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            name: "Daan".into(),
            email: "daan@example.nl".into(),
            role,
        }
    }

    fn payload(name: &str) -> CategoryPayload {
        serde_json::from_value(json!({ "name": name, "color": "#0055ff" })).unwrap()
    }

    fn services() -> (CategoryService, VacatureService) {
        let store = Arc::new(MemoryStore::new());
        (
            CategoryService::new(store.clone(), store.clone()),
            VacatureService::new(store.clone(), store),
        )
    }

    #[tokio::test]
    async fn manager_cannot_create_but_admin_can() {
        let (svc, _) = services();
        let err = svc
            .create(&principal(Role::Manager), payload("Logistiek"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
        assert!(svc.list().await.unwrap().is_empty());

        let category = svc
            .create(&principal(Role::Admin), payload("Zorg & Welzijn"))
            .await
            .unwrap();
        assert_eq!(category.slug, "zorg-welzijn");
        assert!(category.is_active);
    }

    #[tokio::test]
    async fn duplicate_names_conflict_case_insensitively() {
        let (svc, _) = services();
        let admin = principal(Role::Admin);
        svc.create(&admin, payload("Horeca")).await.unwrap();
        let err = svc.create(&admin, payload("horeca")).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn referenced_category_cannot_be_deleted() {
        let (svc, vacatures) = services();
        let admin = principal(Role::Admin);
        let category = svc.create(&admin, payload("Techniek")).await.unwrap();
        let vacature_payload: VacaturePayload = serde_json::from_value(json!({
            "title": "Monteur",
            "vacatureNumber": 5,
            "description": "Sleutelen",
            "city": "Eindhoven",
            "categoryId": category.id
        }))
        .unwrap();
        let vacature = vacatures.create(&admin, vacature_payload).await.unwrap();

        let err = svc.delete(&admin, category.id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(svc.list().await.unwrap().len(), 1);

        vacatures.delete(&admin, vacature.id).await.unwrap();
        svc.delete(&admin, category.id).await.unwrap();
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rename_keeps_own_name_free() {
        let (svc, _) = services();
        let admin = principal(Role::Admin);
        let category = svc.create(&admin, payload("ICT")).await.unwrap();
        let renamed = svc
            .update(&admin, category.id, payload("ICT"))
            .await
            .unwrap();
        assert_eq!(renamed.id, category.id);
        let err = svc
            .update(&principal(Role::Manager), category.id, payload("IT"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }
}
