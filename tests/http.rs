//! Handler-level tests over the in-memory store, asserting the status
//! codes the transport contract promises.

use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{App, test};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use leavehub::{AppState, routes};

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(Data::new(AppState::in_memory()))
                .configure(|cfg| routes::configure(cfg, "/api/v1")),
        )
        .await
    };
}

fn day(offset: i64) -> String {
    (Utc::now().date_naive() + Duration::days(offset)).to_string()
}

fn employee_payload(email: &str) -> Value {
    json!({
        "full_name": "Jane Doe",
        "email": email,
        "department": "engineering",
        "joining_date": "2024-01-01"
    })
}

macro_rules! create_employee {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/employees")
            .set_json(employee_payload($email))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body
    }};
}

#[actix_web::test]
async fn employee_creation_and_duplicate_email() {
    let app = test_app!();

    let employee = create_employee!(&app, "jane@company.com");
    assert_eq!(employee["leave_availability"], 40);
    assert_eq!(employee["email"], "jane@company.com");

    // same address, different case: 409
    let req = test::TestRequest::post()
        .uri("/api/v1/employees")
        .set_json(employee_payload("JANE@company.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "DUPLICATE_EMAIL");
}

#[actix_web::test]
async fn invalid_department_is_bad_request() {
    let app = test_app!();

    let mut payload = employee_payload("jane@company.com");
    payload["department"] = json!("astrology");
    let req = test::TestRequest::post()
        .uri("/api/v1/employees")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_DEPARTMENT");
}

#[actix_web::test]
async fn leave_lifecycle_end_to_end() {
    let app = test_app!();
    let employee = create_employee!(&app, "jane@company.com");
    let employee_id = employee["id"].as_str().unwrap().to_string();

    // submit a 14-day request
    let req = test::TestRequest::post()
        .uri("/api/v1/leave")
        .set_json(json!({
            "employee_id": &employee_id,
            "start_date": day(10),
            "end_date": day(23),
            "reason": "Family vacation"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let leave: Value = test::read_body_json(resp).await;
    assert_eq!(leave["status"], "pending");
    let leave_id = leave["id"].as_str().unwrap().to_string();

    // overlapping second request: 409
    let req = test::TestRequest::post()
        .uri("/api/v1/leave")
        .set_json(json!({
            "employee_id": &employee_id,
            "start_date": day(14),
            "end_date": day(19),
            "reason": "Errand"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "OVERLAP_CONFLICT");

    // pending queue shows exactly one
    let req = test::TestRequest::get()
        .uri("/api/v1/leave/pending")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["total"], 1);

    // approve: 200, balance drops 40 -> 26
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/leave/{leave_id}/status"))
        .set_json(json!({ "status": "approved" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let approved: Value = test::read_body_json(resp).await;
    assert_eq!(approved["status"], "approved");

    // second approval attempt: 400 ALREADY_PROCESSED
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/leave/{leave_id}/status"))
        .set_json(json!({ "status": "approved" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "ALREADY_PROCESSED");

    // the list endpoint reflects the terminal status
    let req = test::TestRequest::get()
        .uri("/api/v1/leave?status=approved")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["id"], leave_id.as_str());
}

#[actix_web::test]
async fn submission_rejections_map_to_status_codes() {
    let app = test_app!();
    let employee = create_employee!(&app, "jane@company.com");
    let employee_id = employee["id"].as_str().unwrap().to_string();

    // past start date: 400
    let req = test::TestRequest::post()
        .uri("/api/v1/leave")
        .set_json(json!({
            "employee_id": &employee_id,
            "start_date": day(-1),
            "end_date": day(5),
            "reason": "Errand"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "PAST_DATE");

    // unknown employee: 404
    let req = test::TestRequest::post()
        .uri("/api/v1/leave")
        .set_json(json!({
            "employee_id": uuid::Uuid::new_v4(),
            "start_date": day(1),
            "end_date": day(5),
            "reason": "Errand"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // missing reason: 400 with the field named
    let req = test::TestRequest::post()
        .uri("/api/v1/leave")
        .set_json(json!({
            "employee_id": &employee_id,
            "start_date": day(1),
            "end_date": day(5)
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "MISSING_FIELD");
}

#[actix_web::test]
async fn transition_rejections_map_to_status_codes() {
    let app = test_app!();
    let employee = create_employee!(&app, "jane@company.com");
    let employee_id = employee["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/leave")
        .set_json(json!({
            "employee_id": &employee_id,
            "start_date": day(1),
            "end_date": day(3),
            "reason": "Errand"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let leave: Value = test::read_body_json(resp).await;
    let leave_id = leave["id"].as_str().unwrap().to_string();

    // unknown request id: 404
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/leave/{}/status", uuid::Uuid::new_v4()))
        .set_json(json!({ "status": "approved" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // pending is not a valid target: 400
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/leave/{leave_id}/status"))
        .set_json(json!({ "status": "pending" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_STATUS");

    // arbitrary strings are invalid too
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/leave/{leave_id}/status"))
        .set_json(json!({ "status": "escalated" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
