use axum::http::{Method, StatusCode};
use chrono::Utc;

mod support;

use support::{expect_json, memory_state, seed_employee, test_router, utc};

#[tokio::test]
async fn status_starts_clocked_out() {
    let state = memory_state();
    seed_employee(&state, "Kim", "0427", 15_000.0).await;
    let app = test_router(state);

    let body = expect_json(&app, Method::GET, "/api/0427/status", None, StatusCode::OK).await;
    assert_eq!(body["status"], "Clocked out");
    assert_eq!(body["breakStatus"], "Not on break");
}

#[tokio::test]
async fn toggles_walk_through_the_shift() {
    let state = memory_state();
    seed_employee(&state, "Kim", "0427", 15_000.0).await;
    let app = test_router(state);

    let day = expect_json(&app, Method::POST, "/api/0427/clock", None, StatusCode::OK).await;
    assert_eq!(day["status"], "Clocked in");
    assert_eq!(day["employeeName"], "Kim");
    assert!(day["firstClockIn"].is_string());

    let day = expect_json(&app, Method::POST, "/api/0427/break", None, StatusCode::OK).await;
    assert_eq!(day["breakStatus"], "On break");

    let status = expect_json(&app, Method::GET, "/api/0427/status", None, StatusCode::OK).await;
    assert_eq!(status["status"], "Clocked in");
    assert_eq!(status["breakStatus"], "On break");

    let err = expect_json(
        &app,
        Method::POST,
        "/api/0427/clock",
        None,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(err["code"], "INVALID_TRANSITION");

    let day = expect_json(&app, Method::POST, "/api/0427/break", None, StatusCode::OK).await;
    assert_eq!(day["breakStatus"], "Not on break");

    let day = expect_json(&app, Method::POST, "/api/0427/clock", None, StatusCode::OK).await;
    assert_eq!(day["status"], "Clocked out");
    assert!(day["lastClockOut"].is_string());

    let events = expect_json(&app, Method::GET, "/api/0427/events", None, StatusCode::OK).await;
    let kinds: Vec<&str> = events["data"]
        .as_array()
        .expect("events")
        .iter()
        .map(|e| e["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec!["clock-in", "break-start", "break-end", "clock-out"]
    );
}

#[tokio::test]
async fn break_while_clocked_out_is_rejected() {
    let state = memory_state();
    seed_employee(&state, "Kim", "0427", 10.0).await;
    let app = test_router(state);

    let err = expect_json(
        &app,
        Method::POST,
        "/api/0427/break",
        None,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(err["code"], "INVALID_TRANSITION");

    let err = expect_json(
        &app,
        Method::POST,
        "/api/0427/break-end",
        None,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(err["code"], "INVALID_TRANSITION");

    let events = expect_json(&app, Method::GET, "/api/0427/events", None, StatusCode::OK).await;
    assert_eq!(events["total"], 0);
}

#[tokio::test]
async fn explicit_transitions_enforce_the_state_machine() {
    let state = memory_state();
    seed_employee(&state, "Kim", "0427", 10.0).await;
    let app = test_router(state);

    expect_json(&app, Method::POST, "/api/0427/clock-in", None, StatusCode::OK).await;
    let err = expect_json(
        &app,
        Method::POST,
        "/api/0427/clock-in",
        None,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(err["code"], "INVALID_TRANSITION");
    assert_eq!(err["error"], "Cannot record clock-in while clocked in");

    expect_json(&app, Method::POST, "/api/0427/break-start", None, StatusCode::OK).await;
    let err = expect_json(
        &app,
        Method::POST,
        "/api/0427/clock-out",
        None,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(err["code"], "INVALID_TRANSITION");

    expect_json(&app, Method::POST, "/api/0427/break-end", None, StatusCode::OK).await;
    let day = expect_json(&app, Method::POST, "/api/0427/clock-out", None, StatusCode::OK).await;
    assert_eq!(day["status"], "Clocked out");
}

#[tokio::test]
async fn unknown_employee_cannot_clock() {
    let app = test_router(memory_state());

    let err = expect_json(
        &app,
        Method::POST,
        "/api/4040/clock",
        None,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(err["code"], "NOT_FOUND");
}

#[tokio::test]
async fn day_status_for_a_past_date_reports_totals() {
    let state = memory_state();
    let employee = seed_employee(&state, "Kim", "0427", 15_000.0).await;
    let id = &employee.employee_id;
    state.ledger.record_clock_in(id, utc(2024, 5, 2, 9, 0)).await.unwrap();
    state.ledger.record_break_start(id, utc(2024, 5, 2, 12, 0)).await.unwrap();
    state.ledger.record_break_end(id, utc(2024, 5, 2, 12, 30)).await.unwrap();
    state.ledger.record_clock_out(id, utc(2024, 5, 2, 17, 0)).await.unwrap();
    let app = test_router(state);

    let day = expect_json(
        &app,
        Method::GET,
        "/api/0427/today?date=2024-05-02",
        None,
        StatusCode::OK,
    )
    .await;
    assert_eq!(day["date"], "2024-05-02");
    assert_eq!(day["totalHoursWorked"], 7.5);
    assert_eq!(day["totalBreakHours"], 0.5);
    assert_eq!(day["dailyWage"], 112_500.0);
    assert_eq!(day["status"], "Clocked out");

    let events = expect_json(
        &app,
        Method::GET,
        "/api/0427/events?date=2024-05-02&limit=2",
        None,
        StatusCode::OK,
    )
    .await;
    assert_eq!(events["total"], 4);
    assert_eq!(events["data"].as_array().unwrap().len(), 2);

    let empty = expect_json(
        &app,
        Method::GET,
        "/api/0427/events?date=2024-05-03",
        None,
        StatusCode::OK,
    )
    .await;
    assert_eq!(empty["total"], 0);

    let err = expect_json(
        &app,
        Method::GET,
        "/api/0427/today?date=May%202",
        None,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(err["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn open_shift_counts_until_now() {
    let state = memory_state();
    let employee = seed_employee(&state, "Kim", "0427", 10.0).await;
    let started = Utc::now() - chrono::Duration::minutes(30);
    state
        .ledger
        .record_clock_in(&employee.employee_id, started)
        .await
        .unwrap();

    let day = state
        .ledger
        .day_status(&employee.employee_id, started.date_naive())
        .await
        .unwrap();
    assert!(day.total_hours_worked > 0.0);
    assert_eq!(day.status, timeclock_backend::models::day_status::ClockStatus::ClockedIn);
}
