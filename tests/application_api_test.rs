mod common;

use axum::http::StatusCode;
use common::{jan_jansen, TestApp};
use serde_json::json;
use uuid::Uuid;
use vacature_backend::models::user::Role;

#[tokio::test]
async fn jan_jansen_submission_starts_new() {
    let app = TestApp::new();
    let reply = app.post("/api/applications", None, jan_jansen()).await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["status"], "NEW");
    assert_eq!(reply.body["firstName"], "Jan");
    assert!(reply.body["vacatureId"].is_null());

    let token = app.staff(Role::Manager).await;
    let listing = app.get("/api/applications", Some(&token)).await;
    assert_eq!(listing.body["total"], 1);
    assert_eq!(listing.body["perPage"], 10);
}

#[tokio::test]
async fn public_cannot_choose_initial_status() {
    let app = TestApp::new();
    let mut body = jan_jansen();
    body["status"] = json!("HIRED");
    let reply = app.post("/api/applications", None, body).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["status"], "NEW");
}

#[tokio::test]
async fn unknown_vacature_is_not_found_and_nothing_stored() {
    let app = TestApp::new();
    let mut body = jan_jansen();
    body["vacatureId"] = json!(Uuid::new_v4());
    let reply = app.post("/api/applications", None, body).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let token = app.staff(Role::Manager).await;
    let listing = app.get("/api/applications", Some(&token)).await;
    assert_eq!(listing.body["total"], 0);
}

#[tokio::test]
async fn invalid_contact_details_are_rejected() {
    let app = TestApp::new();
    let mut body = jan_jansen();
    body["email"] = json!("jan-at-example");
    let reply = app.post("/api/applications", None, body).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["fields"]["email"].is_array());
}

#[tokio::test]
async fn status_change_with_note_is_audited() {
    let app = TestApp::new();
    let token = app.staff(Role::Manager).await;
    let submitted = app.post("/api/applications", None, jan_jansen()).await;
    let id = submitted.body["id"].as_str().unwrap().to_string();

    let reply = app
        .patch(
            &format!("/api/applications/{}", id),
            Some(&token),
            json!({ "status": "CONTACTED", "notes": "called, left voicemail" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "CONTACTED");
    assert_eq!(reply.body["notes"], "called, left voicemail");

    let history = reply.body["history"].as_array().unwrap();
    let status_changes: Vec<_> = history
        .iter()
        .filter(|h| h["type"] == "STATUS_CHANGE")
        .collect();
    assert_eq!(status_changes.len(), 1);
    assert_eq!(status_changes[0]["oldStatus"], "NEW");
    assert_eq!(status_changes[0]["newStatus"], "CONTACTED");
    assert_eq!(status_changes[0]["userName"], "MANAGER user");

    let notes: Vec<_> = history.iter().filter(|h| h["type"] == "NOTE").collect();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["note"], "called, left voicemail");

    let unchanged = app
        .patch(
            &format!("/api/applications/{}", id),
            Some(&token),
            json!({ "status": "CONTACTED" }),
        )
        .await;
    assert_eq!(unchanged.body["history"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn any_status_may_follow_any_other() {
    let app = TestApp::new();
    let token = app.staff(Role::Manager).await;
    let submitted = app.post("/api/applications", None, jan_jansen()).await;
    let id = submitted.body["id"].as_str().unwrap().to_string();

    for status in ["HIRED", "NEW", "WITHDRAWN", "REVIEWED"] {
        let reply = app
            .patch(
                &format!("/api/applications/{}", id),
                Some(&token),
                json!({ "status": status }),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["status"], status);
    }

    let detail = app
        .get(&format!("/api/applications/{}", id), Some(&token))
        .await;
    assert_eq!(detail.body["history"].as_array().unwrap().len(), 4);
    assert_eq!(detail.body["history"][0]["oldStatus"], "NEW");
    assert_eq!(detail.body["history"][0]["newStatus"], "HIRED");
}

#[tokio::test]
async fn listing_filters_and_paginates() {
    let app = TestApp::new();
    let token = app.staff(Role::Manager).await;
    for i in 0..12 {
        let mut body = jan_jansen();
        body["email"] = json!(format!("kandidaat{}@example.nl", i));
        app.post("/api/applications", None, body).await;
    }
    let mut piet = jan_jansen();
    piet["firstName"] = json!("Piet");
    piet["email"] = json!("piet@example.nl");
    let piet = app.post("/api/applications", None, piet).await;
    let piet_id = piet.body["id"].as_str().unwrap().to_string();
    app.patch(
        &format!("/api/applications/{}", piet_id),
        Some(&token),
        json!({ "status": "REJECTED" }),
    )
    .await;

    let second_page = app.get("/api/applications?page=2", Some(&token)).await;
    assert_eq!(second_page.body["total"], 13);
    assert_eq!(second_page.body["totalPages"], 2);
    assert_eq!(second_page.body["items"].as_array().unwrap().len(), 3);

    let rejected = app
        .get("/api/applications?status=REJECTED", Some(&token))
        .await;
    assert_eq!(rejected.body["total"], 1);

    let search = app.get("/api/applications?search=PIET", Some(&token)).await;
    assert_eq!(search.body["total"], 1);
    assert_eq!(search.body["items"][0]["id"], piet_id);
}

#[tokio::test]
async fn staff_can_delete_applications() {
    let app = TestApp::new();
    let token = app.staff(Role::Manager).await;
    let submitted = app.post("/api/applications", None, jan_jansen()).await;
    let id = submitted.body["id"].as_str().unwrap().to_string();

    let reply = app
        .delete(&format!("/api/applications/{}", id), Some(&token))
        .await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    let gone = app
        .get(&format!("/api/applications/{}", id), Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_field_is_reported_as_json_field_error() {
    let app = TestApp::new();
    let mut body = jan_jansen();
    body.as_object_mut().unwrap().remove("phone");

    let reply = app.post("/api/applications", None, body).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        reply.headers["content-type"],
        "application/json"
    );
    assert_eq!(reply.body["error"], "Validation failed");
    assert!(reply.body["fields"]["phone"].is_array());
}

#[tokio::test]
async fn malformed_input_never_falls_back_to_plain_text() {
    let app = TestApp::new();
    let token = app.staff(Role::Manager).await;

    let mut bad_availability = jan_jansen();
    bad_availability["availability"] = json!("every day");
    let reply = app.post("/api/applications", None, bad_availability).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["fields"]["availability"].is_array());

    let reply = app.get("/api/applications/not-a-uuid", Some(&token)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Validation failed");

    let reply = app.get("/api/applications?page=abc", Some(&token)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Validation failed");
}

#[tokio::test]
async fn huge_page_number_is_a_bad_request() {
    let app = TestApp::new();
    let token = app.staff(Role::Manager).await;
    app.post("/api/applications", None, jan_jansen()).await;

    let reply = app
        .get("/api/applications?page=9223372036854775807", Some(&token))
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["error"].is_string());
}
