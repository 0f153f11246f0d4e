mod common;

use axum::http::StatusCode;
use common::{jan_jansen, vacature_body, TestApp};
use serde_json::json;
use vacature_backend::models::user::Role;

#[tokio::test]
async fn create_derives_slug_and_dedups_employment_types() {
    let app = TestApp::new();
    let token = app.staff(Role::Manager).await;

    let reply = app
        .post("/api/vacatures", Some(&token), vacature_body("Chauffeur C/E Amsterdam", 7))
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["slug"], "chauffeur-ce-amsterdam");
    assert_eq!(reply.body["employmentType"], json!(["FULL_TIME", "PART_TIME"]));
    assert_eq!(reply.body["archived"], false);

    let public = app.get("/api/vacatures/chauffeur-ce-amsterdam", None).await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["vacatureNumber"], 7);
}

#[tokio::test]
async fn duplicate_number_is_conflict_and_first_unchanged() {
    let app = TestApp::new();
    let token = app.staff(Role::Manager).await;

    let first = app
        .post("/api/vacatures", Some(&token), vacature_body("Heftruckchauffeur", 42))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .post("/api/vacatures", Some(&token), vacature_body("Magazijnmedewerker", 42))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);

    let stored = app.get("/api/vacatures/heftruckchauffeur", None).await;
    assert_eq!(stored.body, first.body);
    let listing = app.get("/api/vacatures", None).await;
    assert_eq!(listing.body["total"], 1);
}

#[tokio::test]
async fn update_colliding_slug_leaves_vacature_untouched() {
    let app = TestApp::new();
    let token = app.staff(Role::Manager).await;

    app.post("/api/vacatures", Some(&token), vacature_body("Kok", 1))
        .await;
    let second = app
        .post("/api/vacatures", Some(&token), vacature_body("Afwasser", 2))
        .await;
    let id = second.body["id"].as_str().unwrap().to_string();

    let mut body = vacature_body("Afwasser", 2);
    body["slug"] = json!("kok");
    let reply = app
        .put(&format!("/api/vacatures/{}", id), Some(&token), body)
        .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);

    let unchanged = app.get(&format!("/api/vacatures/{}", id), None).await;
    assert_eq!(unchanged.body["slug"], "afwasser");

    let mut retitled = vacature_body("Afwasser (parttime)", 2);
    retitled["city"] = json!("Utrecht");
    let reply = app
        .put(&format!("/api/vacatures/{}", id), Some(&token), retitled)
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["slug"], "afwasser");
    assert_eq!(reply.body["city"], "Utrecht");
}

#[tokio::test]
async fn public_listing_shows_only_active_unarchived() {
    let app = TestApp::new();
    let token = app.staff(Role::Manager).await;

    app.post("/api/vacatures", Some(&token), vacature_body("Actief", 1))
        .await;
    let mut inactive = vacature_body("Inactief", 2);
    inactive["isActive"] = json!(false);
    app.post("/api/vacatures", Some(&token), inactive).await;
    let archived = app
        .post("/api/vacatures", Some(&token), vacature_body("Gearchiveerd", 3))
        .await;
    let archived_id = archived.body["id"].as_str().unwrap().to_string();
    let toggled = app
        .post(
            &format!("/api/vacatures/{}/archive", archived_id),
            Some(&token),
            json!({}),
        )
        .await;
    assert_eq!(toggled.body["archived"], true);
    assert_eq!(toggled.body["isActive"], true);

    let active = app.get("/api/vacatures?active=true", None).await;
    assert_eq!(active.status, StatusCode::OK);
    let titles: Vec<&str> = active.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Actief"]);

    let unfiltered = app.get("/api/vacatures", None).await;
    assert_eq!(unfiltered.body["total"], 1);
    assert_eq!(unfiltered.body["items"][0]["title"], "Actief");
    let blank = app.get("/api/vacatures?active=", None).await;
    assert_eq!(blank.body["total"], 1);

    let inactive_only = app.get("/api/vacatures?active=false", None).await;
    assert_eq!(inactive_only.status, StatusCode::OK);
    assert_eq!(inactive_only.body["total"], 0);

    let hidden = app.get("/api/vacatures/gearchiveerd", None).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);
    let draft = app.get("/api/vacatures/inactief", None).await;
    assert_eq!(draft.status, StatusCode::NOT_FOUND);

    let staff_inactive = app
        .get("/api/admin/vacatures?active=false", Some(&token))
        .await;
    assert_eq!(staff_inactive.body["total"], 1);
    assert_eq!(staff_inactive.body["items"][0]["title"], "Inactief");

    let staff_view = app
        .get("/api/admin/vacatures?archived=true", Some(&token))
        .await;
    assert_eq!(staff_view.body["total"], 1);
    assert_eq!(staff_view.body["items"][0]["title"], "Gearchiveerd");
}

#[tokio::test]
async fn invalid_filter_value_is_bad_request() {
    let app = TestApp::new();
    let reply = app.get("/api/vacatures?categoryId=not-a-uuid", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_vacature_keeps_its_applications() {
    let app = TestApp::new();
    let manager = app.staff(Role::Manager).await;
    let admin = app.staff(Role::Admin).await;

    let vacature = app
        .post("/api/vacatures", Some(&manager), vacature_body("Schoonmaker", 5))
        .await;
    let vacature_id = vacature.body["id"].as_str().unwrap().to_string();

    let mut application = jan_jansen();
    application["vacatureId"] = json!(vacature_id);
    let submitted = app.post("/api/applications", None, application).await;
    assert_eq!(submitted.status, StatusCode::CREATED);
    let application_id = submitted.body["id"].as_str().unwrap().to_string();

    let refused = app
        .delete(&format!("/api/vacatures/{}", vacature_id), Some(&manager))
        .await;
    assert_eq!(refused.status, StatusCode::FORBIDDEN);

    let deleted = app
        .delete(&format!("/api/vacatures/{}", vacature_id), Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let kept = app
        .get(&format!("/api/applications/{}", application_id), Some(&manager))
        .await;
    assert_eq!(kept.status, StatusCode::OK);
    assert!(kept.body["vacatureId"].is_null());
    assert!(kept.body["vacatureTitle"].is_null());

    let again = app
        .delete(&format!("/api/vacatures/{}", vacature_id), Some(&admin))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_slug_or_id_is_not_found() {
    let app = TestApp::new();
    let token = app.staff(Role::Manager).await;
    app.post("/api/vacatures", Some(&token), vacature_body("Kok", 1))
        .await;

    let by_slug = app.get("/api/vacatures/bestaat-niet", None).await;
    assert_eq!(by_slug.status, StatusCode::NOT_FOUND);
    assert!(by_slug.body["error"].is_string());

    let by_id = app
        .get(&format!("/api/vacatures/{}", uuid::Uuid::new_v4()), None)
        .await;
    assert_eq!(by_id.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn public_listing_filters_on_city_and_category() {
    let app = TestApp::new();
    let admin = app.staff(Role::Admin).await;

    let category = app
        .post("/api/categories", Some(&admin), json!({ "name": "Logistiek" }))
        .await;
    assert_eq!(category.status, StatusCode::CREATED);
    let category_id = category.body["id"].as_str().unwrap().to_string();

    let mut driver = vacature_body("Chauffeur", 1);
    driver["categoryId"] = json!(category_id);
    app.post("/api/vacatures", Some(&admin), driver).await;
    let mut cook = vacature_body("Kok", 2);
    cook["city"] = json!("Rotterdam");
    app.post("/api/vacatures", Some(&admin), cook).await;

    let in_city = app.get("/api/vacatures?city=rOTTERDAM", None).await;
    assert_eq!(in_city.body["total"], 1);
    assert_eq!(in_city.body["items"][0]["title"], "Kok");

    let in_category = app
        .get(&format!("/api/vacatures?categoryId={}", category_id), None)
        .await;
    assert_eq!(in_category.body["total"], 1);
    assert_eq!(in_category.body["items"][0]["title"], "Chauffeur");

    let nowhere = app.get("/api/vacatures?city=Groningen", None).await;
    assert_eq!(nowhere.body["total"], 0);
}
