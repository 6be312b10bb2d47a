//! Breaking times: schedule reachability and HH:MM round-tripping.

mod support;

use actix_web::test;
use serde_json::json;

use backend::domain::EmployeeId;
use uuid::Uuid;

use support::{
    advisory_state, body_with_status, create_barbershop, create_employee, get, login_fresh,
    post_json, put_json, signup, test_app,
};

/// A created breaking time reads back with the exact same HH:MM strings.
#[actix_web::test]
async fn times_round_trip_formatted_identically() {
    let (store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;

    let owner = login_fresh(&app, "Alice", "alice@example.com").await;
    signup(&app, "Bob", "bob@example.com").await;
    let shop_id = create_barbershop(&app, &owner, "Corner Cuts").await;
    let employee_id = create_employee(&app, &owner, &shop_id, "bob@example.com").await;

    // The schedule was created with the employee (1:1).
    let employee_uuid: Uuid = employee_id.parse().expect("employee uuid");
    let schedule = store
        .schedule_for_employee(EmployeeId::new(employee_uuid))
        .expect("schedule auto-created with the employee");

    let res = post_json(
        &app,
        &owner,
        "/api/v1/breakingtime",
        json!({
            "starting_time": "09:00",
            "ending_time": "12:30",
            "schedule_id": schedule.id,
        }),
    )
    .await;
    let body = body_with_status(res, 201).await;
    let breaking_time_id = body["data"]["id"].as_str().expect("breaking time id").to_owned();
    assert_eq!(body["data"]["starting_time"], json!("09:00"));
    assert_eq!(body["data"]["ending_time"], json!("12:30"));
    assert_eq!(
        body["message"],
        json!(format!(
            "Breaking Time with id {breaking_time_id} created successfully"
        ))
    );

    let res = get(&app, &owner, &format!("/api/v1/breakingtime/{breaking_time_id}")).await;
    let body = body_with_status(res, 200).await;
    assert_eq!(body["data"]["starting_time"], json!("09:00"));
    assert_eq!(body["data"]["ending_time"], json!("12:30"));

    // Partial update touches only the ending time.
    let res = put_json(
        &app,
        &owner,
        &format!("/api/v1/breakingtime/{breaking_time_id}"),
        json!({ "ending_time": "13:00" }),
    )
    .await;
    let body = body_with_status(res, 200).await;
    assert_eq!(body["data"]["starting_time"], json!("09:00"));
    assert_eq!(body["data"]["ending_time"], json!("13:00"));
}

/// A schedule outside the caller's chain is rejected explicitly.
#[actix_web::test]
async fn foreign_schedule_reference_is_forbidden() {
    let (store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;

    let alice = login_fresh(&app, "Alice", "alice@example.com").await;
    signup(&app, "Bob", "bob@example.com").await;
    let shop_id = create_barbershop(&app, &alice, "Corner Cuts").await;
    let employee_id = create_employee(&app, &alice, &shop_id, "bob@example.com").await;
    let employee_uuid: Uuid = employee_id.parse().expect("employee uuid");
    let schedule = store
        .schedule_for_employee(EmployeeId::new(employee_uuid))
        .expect("schedule auto-created with the employee");

    let intruder = login_fresh(&app, "Mallory", "mallory@example.com").await;
    let res = post_json(
        &app,
        &intruder,
        "/api/v1/breakingtime",
        json!({
            "starting_time": "09:00",
            "ending_time": "12:30",
            "schedule_id": schedule.id,
        }),
    )
    .await;
    let body = body_with_status(res, 403).await;
    assert_eq!(
        body["error"],
        json!("Schedule not found or does not belong to your barbershop")
    );
}

/// Malformed HH:MM values report per-field messages.
#[actix_web::test]
async fn malformed_times_fail_validation() {
    let (_store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;
    let owner = login_fresh(&app, "Alice", "alice@example.com").await;

    let res = post_json(
        &app,
        &owner,
        "/api/v1/breakingtime",
        json!({
            "starting_time": "24:00",
            "ending_time": "noon",
            "schedule_id": Uuid::new_v4(),
        }),
    )
    .await;
    let body = body_with_status(res, 400).await;
    assert_eq!(
        body["details"],
        json!([
            { "field": "starting_time", "message": "Starting time must be in HH:MM format" },
            { "field": "ending_time", "message": "Ending time must be in HH:MM format" },
        ])
    );
}
