use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Application status. There is no transition table: staff may move an
/// application from any status to any other status in one step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "application_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    New,
    Reviewed,
    Contacted,
    InterviewScheduled,
    Hired,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 7] = [
        ApplicationStatus::New,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Contacted,
        ApplicationStatus::InterviewScheduled,
        ApplicationStatus::Hired,
        ApplicationStatus::Rejected,
        ApplicationStatus::Withdrawn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::New => "NEW",
            ApplicationStatus::Reviewed => "REVIEWED",
            ApplicationStatus::Contacted => "CONTACTED",
            ApplicationStatus::InterviewScheduled => "INTERVIEW_SCHEDULED",
            ApplicationStatus::Hired => "HIRED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Withdrawn => "WITHDRAWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub city: Option<String>,
    pub gender: Option<String>,
    pub experience: Option<String>,
    /// Vacancy references picked by the candidate. Independent of
    /// `vacature_id`; the two are never reconciled.
    pub selected_vacatures: Vec<String>,
    pub availability: Vec<String>,
    pub vacature_id: Option<Uuid>,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "history_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryType {
    StatusChange,
    Note,
}

/// Append-only audit entry owned by an [`Application`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationHistory {
    pub id: Uuid,
    pub application_id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: HistoryType,
    pub old_status: Option<ApplicationStatus>,
    pub new_status: Option<ApplicationStatus>,
    pub note: Option<String>,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

impl ApplicationHistory {
    pub fn status_change(
        application_id: Uuid,
        old_status: ApplicationStatus,
        new_status: ApplicationStatus,
        user_name: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            application_id,
            kind: HistoryType::StatusChange,
            old_status: Some(old_status),
            new_status: Some(new_status),
            note: None,
            user_name: user_name.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn note(application_id: Uuid, note: &str, user_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            application_id,
            kind: HistoryType::Note,
            old_status: None,
            new_status: None,
            note: Some(note.to_string()),
            user_name: user_name.to_string(),
            created_at: Utc::now(),
        }
    }
}
