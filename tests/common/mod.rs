#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;
use vacature_backend::{
    config::{Config, Environment, DEFAULT_ADMIN_FALLBACK_HOST},
    database::{memory::MemoryStore, UserRepository},
    models::user::{Principal, Role, User},
    routes,
    utils::{crypto::hash_password, token::issue_session_token},
    AppState,
};

pub const JWT_SECRET: &str = "test_secret_key";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: JsonValue,
    pub text: String,
}

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".to_string(),
        database_url: None,
        jwt_secret: JWT_SECRET.to_string(),
        session_ttl_hours: 24,
        public_api_base_url: None,
        admin_fallback_host: DEFAULT_ADMIN_FALLBACK_HOST.to_string(),
        frontend_origin: None,
        environment: Environment::Development,
        public_rps: 1000,
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(config, store.clone());
        Self {
            router: routes::app(state),
            store,
        }
    }

    pub async fn seed_user(&self, role: Role, email: &str, password: &str) -> Principal {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: format!("{} user", role),
            hashed_password: hash_password(password).expect("hash"),
            role,
            created_at: Utc::now(),
        };
        self.store.insert_user(&user).await.expect("seed user");
        Principal::from(&user)
    }

    pub async fn staff(&self, role: Role) -> String {
        let email = format!("{}@example.nl", Uuid::new_v4());
        let principal = self.seed_user(role, &email, "password-123").await;
        issue_session_token(&principal, JWT_SECRET, 1).expect("token")
    }

    pub async fn send(&self, request: Request<Body>) -> Reply {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
        Reply {
            status,
            headers,
            body,
            text,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Reply {
        self.send(request("GET", uri, token, None)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: JsonValue) -> Reply {
        self.send(request("POST", uri, token, Some(body))).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: JsonValue) -> Reply {
        self.send(request("PUT", uri, token, Some(body))).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: JsonValue) -> Reply {
        self.send(request("PATCH", uri, token, Some(body))).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Reply {
        self.send(request("DELETE", uri, token, None)).await
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<JsonValue>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub fn vacature_body(title: &str, number: i32) -> JsonValue {
    json!({
        "title": title,
        "vacatureNumber": number,
        "description": "Rijden in de regio Amsterdam.",
        "city": "Amsterdam",
        "requirements": ["Rijbewijs C"],
        "benefits": ["Leaseauto"],
        "employmentType": ["FULL_TIME", "FULL_TIME", "PART_TIME"],
        "isActive": true
    })
}

pub fn jan_jansen() -> JsonValue {
    json!({
        "firstName": "Jan",
        "lastName": "Jansen",
        "email": "jan@example.nl",
        "phone": "0612345678",
        "selectedVacatures": [],
        "availability": [],
        "source": "website"
    })
}
