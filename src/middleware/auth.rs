//! Session gate in front of every route.
//!
//! The gate resolves the caller's session, decides whether the request may
//! proceed, and stamps `x-pathname` on whatever response goes out. Role
//! checks live in the services; the gate only knows "signed in or not".

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{error::Error, models::user::Principal, AppState};

pub const SESSION_COOKIE: &str = "session_token";
pub const PATHNAME_HEADER: &str = "x-pathname";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    /// Location of the login page carrying the original target.
    RedirectToLogin(String),
    RedirectToRoot,
    Unauthorized,
}

/// Routes reachable without a session.
pub fn is_public_route(path: &str, method: &Method) -> bool {
    if path == "/login" || path == "/health" || path == "/api/openapi.json" {
        return true;
    }
    if path == "/site" || path.starts_with("/site/") || path.starts_with("/api/auth/") {
        return true;
    }

    let vacature_read = path == "/api/vacatures" || path.starts_with("/api/vacatures/");
    let application_intake = path == "/api/applications";
    match *method {
        Method::GET | Method::HEAD => vacature_read,
        Method::POST => application_intake,
        Method::OPTIONS => vacature_read || application_intake,
        _ => false,
    }
}

pub fn gate_decision(
    path: &str,
    query: Option<&str>,
    method: &Method,
    authenticated: bool,
) -> GateDecision {
    if authenticated && path == "/login" {
        return GateDecision::RedirectToRoot;
    }
    if authenticated || is_public_route(path, method) {
        return GateDecision::Allow;
    }
    if path == "/api" || path.starts_with("/api/") {
        return GateDecision::Unauthorized;
    }

    let target = match query {
        Some(q) if !q.is_empty() => format!("{}?{}", path, q),
        _ => path.to_string(),
    };
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    GateDecision::RedirectToLogin(format!("/login?callbackUrl={}", encoded))
}

/// Bearer header first, then the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value_trimmed().to_string())
        .filter(|t| !t.is_empty())
}

pub async fn session_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let principal =
        session_token(req.headers()).and_then(|token| state.auth_service.resolve_session(&token));

    let decision = gate_decision(
        &path,
        req.uri().query(),
        req.method(),
        principal.is_some(),
    );
    let mut response = match decision {
        GateDecision::Allow => {
            if let Some(principal) = principal {
                req.extensions_mut().insert(principal);
            }
            next.run(req).await
        }
        GateDecision::RedirectToRoot => Redirect::temporary("/").into_response(),
        GateDecision::RedirectToLogin(location) => {
            tracing::debug!(path = %path, "no session, redirecting to login");
            Redirect::temporary(&location).into_response()
        }
        GateDecision::Unauthorized => {
            Error::Unauthorized("Authentication required".into()).into_response()
        }
    };

    if let Ok(value) = HeaderValue::from_str(&path) {
        response.headers_mut().insert(PATHNAME_HEADER, value);
    }
    response
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| Error::Unauthorized("Authentication required".into()))
    }
}

/// Cookie carrying a fresh session.
pub fn session_cookie(token: String, ttl_hours: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::hours(ttl_hours))
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}
