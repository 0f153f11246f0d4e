use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::database::{ApplicationFilter, ApplicationRepository, VacatureRepository};
use crate::dto::application_dto::{
    ApplicationDetailResponse, ApplicationListQuery, ApplicationListResponse,
    SubmitApplicationPayload, UpdateApplicationPayload,
};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationHistory, ApplicationStatus};
use crate::models::user::{Principal, Role};
use crate::services::access::require_role;

pub const APPLICATIONS_PAGE_SIZE: i64 = 10;

#[derive(Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    vacatures: Arc<dyn VacatureRepository>,
}

impl ApplicationService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        vacatures: Arc<dyn VacatureRepository>,
    ) -> Self {
        Self {
            applications,
            vacatures,
        }
    }

    /// Public intake. Every submission starts as `NEW`.
    pub async fn submit(&self, payload: SubmitApplicationPayload) -> Result<Application> {
        payload.validate()?;

        if let Some(vacature_id) = payload.vacature_id {
            if self.vacatures.find_vacature(vacature_id).await?.is_none() {
                return Err(Error::NotFound(format!(
                    "Vacature {} not found",
                    vacature_id
                )));
            }
        }

        let now = Utc::now();
        let application = Application {
            id: Uuid::new_v4(),
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            email: payload.email.trim().to_lowercase(),
            phone: payload.phone.trim().to_string(),
            birth_date: payload.birth_date,
            city: payload.city,
            gender: payload.gender,
            experience: payload.experience,
            selected_vacatures: payload.selected_vacatures,
            availability: payload.availability,
            vacature_id: payload.vacature_id,
            status: ApplicationStatus::New,
            notes: None,
            source: payload.source,
            created_at: now,
            updated_at: now,
        };
        self.applications.insert_application(&application).await?;

        tracing::info!(
            application_id = %application.id,
            vacature_id = ?application.vacature_id,
            source = ?application.source,
            "application received"
        );
        Ok(application)
    }

    /// Applies a status and/or notes change. Any status may follow any other;
    /// a real change appends one `STATUS_CHANGE` entry and a changed,
    /// non-empty note appends one `NOTE` entry, both attributed to the caller.
    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        payload: UpdateApplicationPayload,
    ) -> Result<ApplicationDetailResponse> {
        require_role(principal, Role::Manager)?;
        payload.validate()?;

        let mut application = self.get_application(id).await?;
        let mut history = Vec::new();
        let mut changed = false;

        if let Some(new_status) = payload.status {
            if new_status != application.status {
                history.push(ApplicationHistory::status_change(
                    id,
                    application.status,
                    new_status,
                    &principal.name,
                ));
                application.status = new_status;
                changed = true;
            }
        }

        if let Some(notes) = payload.notes {
            let trimmed = notes.trim();
            let new_notes = (!trimmed.is_empty()).then(|| trimmed.to_string());
            if new_notes != application.notes {
                if let Some(note) = &new_notes {
                    history.push(ApplicationHistory::note(id, note, &principal.name));
                }
                application.notes = new_notes;
                changed = true;
            }
        }

        if changed {
            application.updated_at = Utc::now();
            self.applications
                .save_application(&application, &history)
                .await?;
        }

        tracing::info!(
            application_id = %id,
            status = application.status.as_str(),
            history_entries = history.len(),
            updated_by = %principal.id,
            "application updated"
        );
        self.detail(application).await
    }

    pub async fn get(&self, principal: &Principal, id: Uuid) -> Result<ApplicationDetailResponse> {
        require_role(principal, Role::Manager)?;
        let application = self.get_application(id).await?;
        self.detail(application).await
    }

    /// Removes the application and its history permanently.
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<()> {
        require_role(principal, Role::Manager)?;
        if !self.applications.delete_application(id).await? {
            return Err(Error::NotFound("Application not found".into()));
        }
        tracing::info!(application_id = %id, deleted_by = %principal.id, "application deleted");
        Ok(())
    }

    pub async fn list(
        &self,
        principal: &Principal,
        query: ApplicationListQuery,
    ) -> Result<ApplicationListResponse> {
        require_role(principal, Role::Manager)?;
        let page = query.page.unwrap_or(1).max(1);
        let per_page = APPLICATIONS_PAGE_SIZE;
        let offset = (page - 1)
            .checked_mul(per_page)
            .ok_or_else(|| Error::BadRequest(format!("Invalid value for page: {}", page)))?;
        let filter = ApplicationFilter {
            status: query.status,
            search: query
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            limit: per_page,
            offset,
        };
        let (items, total) = self.applications.list_applications(&filter).await?;
        let total_pages = (total + per_page - 1) / per_page;

        Ok(ApplicationListResponse {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    async fn get_application(&self, id: Uuid) -> Result<Application> {
        self.applications
            .find_application(id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".into()))
    }

    async fn detail(&self, application: Application) -> Result<ApplicationDetailResponse> {
        let history = self.applications.application_history(application.id).await?;
        let vacature_title = match application.vacature_id {
            Some(vacature_id) => self
                .vacatures
                .find_vacature(vacature_id)
                .await?
                .map(|v| v.title),
            None => None,
        };
        Ok(ApplicationDetailResponse {
            application,
            history,
            vacature_title,
        })
    }
}
