mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::json;
use vacature_backend::models::user::Role;

#[tokio::test]
async fn pages_without_session_redirect_to_login() {
    let app = TestApp::new();
    let reply = app.get("/admin/applications?page=2", None).await;

    assert_eq!(reply.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        reply.headers[header::LOCATION],
        "/login?callbackUrl=%2Fadmin%2Fapplications%3Fpage%3D2"
    );
    assert_eq!(reply.headers["x-pathname"], "/admin/applications");
}

#[tokio::test]
async fn staff_api_without_session_is_401_json() {
    let app = TestApp::new();
    let reply = app.get("/api/applications", None).await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert!(reply.body["error"].is_string());
    assert_eq!(reply.headers["x-pathname"], "/api/applications");

    let forged = app.get("/api/dashboard/stats", Some("not-a-jwt")).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_routes_need_no_session() {
    let app = TestApp::new();
    assert_eq!(app.get("/health", None).await.status, StatusCode::OK);
    assert_eq!(app.get("/api/vacatures", None).await.status, StatusCode::OK);
    assert_eq!(app.get("/api/openapi.json", None).await.status, StatusCode::OK);

    let login = app.get("/login", None).await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.text.contains("/api/auth/login"));
    assert_eq!(login.headers["x-pathname"], "/login");
}

#[tokio::test]
async fn signed_in_login_visit_redirects_home() {
    let app = TestApp::new();
    let token = app.staff(Role::Manager).await;
    let reply = app.get("/login", Some(&token)).await;

    assert_eq!(reply.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(reply.headers[header::LOCATION], "/");
}

#[tokio::test]
async fn login_sets_cookie_that_opens_the_session() {
    let app = TestApp::new();
    app.seed_user(Role::Admin, "admin@example.nl", "correct-horse").await;

    let reply = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "admin@example.nl", "password": "correct-horse" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["role"], "ADMIN");
    assert!(reply.body["user"].get("hashedPassword").is_none());
    let cookie = reply.headers[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("session_token="));

    let pair = cookie.split(';').next().unwrap().to_string();
    let session = app
        .send(
            Request::builder()
                .uri("/api/auth/session")
                .header(header::COOKIE, pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(session.status, StatusCode::OK);
    assert_eq!(session.body["email"], "admin@example.nl");
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = TestApp::new();
    app.seed_user(Role::Admin, "admin@example.nl", "correct-horse").await;

    let reply = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "admin@example.nl", "password": "battery-staple" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert!(reply.headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = TestApp::new();
    let reply = app.post("/api/auth/logout", None, json!({})).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    assert!(reply.headers[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));
}
