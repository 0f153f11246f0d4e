use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
pub(crate) const APPLICATION_VACATURE_FKEY: &str = "applications_vacature_id_fkey";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Request input that could not be decoded, reported against one field.
    #[error("Invalid input for {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// Any other extractor rejection, keeping the status axum chose.
    #[error("Rejected request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, json!({ "error": msg })),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            Error::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            Error::Validation(err) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation failed", "fields": err }),
            ),
            Error::Rejected { status, message } => (status, json!({ "error": message })),
            Error::InvalidInput { field, message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Validation failed",
                    "fields": { field: [{ "code": "invalid", "message": message, "params": {} }] }
                }),
            ),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An unexpected error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        let (code, constraint) = match &err {
            sqlx::Error::RowNotFound => {
                return Error::NotFound("Resource not found".to_string());
            }
            sqlx::Error::Database(db_err) => (
                db_err.code().map(|c| c.into_owned()),
                db_err.constraint().map(str::to_string),
            ),
            _ => return Error::Database(err),
        };
        match code.as_deref() {
            Some(PG_UNIQUE_VIOLATION) => Error::Conflict(format!(
                "Duplicate value violates {}",
                constraint.as_deref().unwrap_or("a uniqueness constraint")
            )),
            Some(PG_FOREIGN_KEY_VIOLATION) => foreign_key_error(constraint.as_deref()),
            _ => Error::Database(err),
        }
    }
}

/// Applications only ever break their vacature key on insert (the parent side
/// is `ON DELETE SET NULL`), so that violation means the vacature is gone.
/// Every other key is reported as a dangling reference.
pub(crate) fn foreign_key_error(constraint: Option<&str>) -> Error {
    match constraint {
        Some(APPLICATION_VACATURE_FKEY) => Error::NotFound("Vacature not found".to_string()),
        other => Error::Conflict(format!(
            "Record is still referenced ({})",
            other.unwrap_or("foreign key")
        )),
    }
}
