use axum::http::{Method, StatusCode};
use serde_json::json;

mod support;

use support::{body_json, expect_json, memory_state, seed_employee, send, test_router, utc};

#[tokio::test]
async fn create_employee_accepts_form_strings_and_issues_pin() {
    let app = test_router(memory_state());

    let created = expect_json(
        &app,
        Method::POST,
        "/api/employee",
        Some(json!({
            "name": "Kim Minji",
            "hourlyWage": "15000",
            "active": "true",
            "role": "admin"
        })),
        StatusCode::CREATED,
    )
    .await;

    let pin = created["employeeId"].as_str().expect("pin");
    assert_eq!(pin.len(), 4);
    assert!(pin.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(created["hourlyWage"], json!(15000.0));
    assert_eq!(created["role"], "admin");
    assert_eq!(created["active"], true);

    let fetched = expect_json(
        &app,
        Method::GET,
        &format!("/api/employee/{}", pin),
        None,
        StatusCode::OK,
    )
    .await;
    assert_eq!(fetched["name"], "Kim Minji");
}

#[tokio::test]
async fn create_employee_rejects_invalid_payloads() {
    let app = test_router(memory_state());

    let body = expect_json(
        &app,
        Method::POST,
        "/api/employee",
        Some(json!({ "name": "   ", "hourlyWage": -1 })),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let errors = body["details"]["errors"].as_array().expect("errors");
    assert_eq!(errors.len(), 2);

    let body = expect_json(
        &app,
        Method::POST,
        "/api/employee",
        Some(json!({ "name": "Lee", "hourlyWage": "lots" })),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let body = expect_json(
        &app,
        Method::POST,
        "/api/employee",
        Some(json!({ "name": "Lee", "hourlyWage": 10, "employeeId": "12ab" })),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn duplicate_pin_is_a_conflict() {
    let app = test_router(memory_state());
    let payload = json!({ "name": "Park", "hourlyWage": 12, "employeeId": "2468" });

    expect_json(
        &app,
        Method::POST,
        "/api/employee",
        Some(payload.clone()),
        StatusCode::CREATED,
    )
    .await;
    let body = expect_json(
        &app,
        Method::POST,
        "/api/employee",
        Some(payload),
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn unknown_or_malformed_pin_is_not_found() {
    let app = test_router(memory_state());

    let body = expect_json(
        &app,
        Method::GET,
        "/api/employee/9999",
        None,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(body["code"], "NOT_FOUND");

    let response = send(&app, Method::GET, "/api/employee/abc", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_employees_in_creation_order() {
    let state = memory_state();
    seed_employee(&state, "First", "1111", 10.0).await;
    seed_employee(&state, "Second", "0002", 11.0).await;
    let app = test_router(state);

    let list = expect_json(&app, Method::GET, "/api/employee", None, StatusCode::OK).await;
    let names: Vec<&str> = list
        .as_array()
        .expect("array")
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[tokio::test]
async fn update_changes_rate_and_keeps_pin() {
    let state = memory_state();
    seed_employee(&state, "Choi", "3141", 10.0).await;
    let app = test_router(state);

    let updated = expect_json(
        &app,
        Method::PUT,
        "/api/employee/3141",
        Some(json!({ "hourlyWage": "12.5", "role": "manager" })),
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["employeeId"], "3141");
    assert_eq!(updated["hourlyWage"], json!(12.5));
    assert_eq!(updated["role"], "manager");
    assert_eq!(updated["name"], "Choi");

    let body = expect_json(
        &app,
        Method::PUT,
        "/api/employee/3141",
        Some(json!({ "name": "" })),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn delete_without_history_removes_employee() {
    let state = memory_state();
    seed_employee(&state, "Jung", "5150", 10.0).await;
    let app = test_router(state);

    let response = send(&app, Method::DELETE, "/api/employee/5150", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::GET, "/api/employee/5150", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::DELETE, "/api/employee/5150", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_with_history_conflicts_and_deactivate_blocks_clocking() {
    let state = memory_state();
    let employee = seed_employee(&state, "Han", "8080", 10.0).await;
    state
        .ledger
        .record_clock_in(&employee.employee_id, utc(2024, 4, 1, 9, 0))
        .await
        .expect("clock in");
    state
        .ledger
        .record_clock_out(&employee.employee_id, utc(2024, 4, 1, 17, 0))
        .await
        .expect("clock out");
    let app = test_router(state);

    let body = expect_json(
        &app,
        Method::DELETE,
        "/api/employee/8080",
        None,
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(body["code"], "CONFLICT");

    let deactivated = expect_json(
        &app,
        Method::POST,
        "/api/employee/8080/deactivate",
        None,
        StatusCode::OK,
    )
    .await;
    assert_eq!(deactivated["active"], false);

    let response = send(&app, Method::POST, "/api/8080/clock", None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["code"], "FORBIDDEN");

    let events = expect_json(
        &app,
        Method::GET,
        "/api/8080/events",
        None,
        StatusCode::OK,
    )
    .await;
    assert_eq!(events["total"], 2);
}
