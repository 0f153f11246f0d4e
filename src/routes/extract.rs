//! Request extractors whose rejections render through [`Error`], so a
//! malformed body, path or query string gets the same JSON error shape as a
//! payload that fails validation.

use axum::extract::{
    path::ErrorKind,
    rejection::{JsonRejection, PathRejection, QueryRejection},
    FromRequest, FromRequestParts,
};

use crate::error::Error;

const JSON_DATA_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct ApiQuery<T>(pub T);

/// Splits a serde data error (`"<path>: <message>"`) into the offending
/// field and the message. Root-level errors name the missing field when
/// serde reports one.
fn field_of(detail: &str) -> (String, String) {
    let detail = detail.strip_prefix(JSON_DATA_PREFIX).unwrap_or(detail);
    let (path, message) = match detail.split_once(": ") {
        Some((path, message)) if !path.contains(' ') => (path, message),
        _ => (".", detail),
    };
    let message = match message.find(" at line ") {
        Some(idx) => &message[..idx],
        None => message,
    };
    let field = if path == "." {
        message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split_once('`'))
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| "body".to_string())
    } else {
        path.to_string()
    };
    (field, message.to_string())
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let (field, message) = field_of(&err.body_text());
                Error::InvalidInput { field, message }
            }
            JsonRejection::JsonSyntaxError(_) => Error::InvalidInput {
                field: "body".into(),
                message: "Request body is not valid JSON".into(),
            },
            JsonRejection::MissingJsonContentType(_) => Error::InvalidInput {
                field: "body".into(),
                message: "Expected `Content-Type: application/json`".into(),
            },
            other => Error::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                let field = match err.kind() {
                    ErrorKind::ParseErrorAtKey { key, .. } => key.clone(),
                    ErrorKind::InvalidUtf8InPathParam { key } => key.clone(),
                    _ => "path".to_string(),
                };
                Error::InvalidInput {
                    field,
                    message: err.body_text(),
                }
            }
            other => Error::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        let message = rejection.body_text();
        let detail = message
            .strip_prefix("Failed to deserialize query string: ")
            .unwrap_or(&message);
        let field = detail
            .split_once(": ")
            .filter(|(key, _)| !key.contains(' '))
            .map(|(key, _)| key.to_string())
            .unwrap_or_else(|| "query".to_string());
        Error::InvalidInput {
            field,
            message: detail.to_string(),
        }
    }
}
