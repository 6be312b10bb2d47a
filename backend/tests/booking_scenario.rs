//! End-to-end booking flow over the HTTP surface.

mod support;

use actix_web::test;
use serde_json::{Value, json};

use support::{
    advisory_state, body_with_status, create_barbershop, create_employee, create_service, get,
    login_fresh, post_json, put_json, test_app,
};

#[actix_web::test]
async fn owner_builds_a_shop_and_books_an_appointment() {
    let (_store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;

    let owner = login_fresh(&app, "Alice", "alice@example.com").await;
    support::signup(&app, "Bob", "bob@example.com").await;

    let shop_id = create_barbershop(&app, &owner, "Corner Cuts").await;
    let employee_id = create_employee(&app, &owner, &shop_id, "bob@example.com").await;
    let service_id = create_service(&app, &owner, &shop_id, "Haircut").await;

    // Create the appointment: 201, status starts PENDENTE.
    let res = post_json(
        &app,
        &owner,
        "/api/v1/appointment",
        json!({
            "client_name": "Carlos",
            "client_contact": "555-123-4567",
            "datetime": "2026-03-01T10:00:00Z",
            "employee_id": employee_id,
            "service_id": service_id,
        }),
    )
    .await;
    let body = body_with_status(res, 201).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("PENDENTE"));
    let appointment_id = body["data"]["id"].as_str().expect("appointment id").to_owned();
    assert_eq!(
        body["message"],
        json!(format!("Carlos with id {appointment_id} created successfully"))
    );

    // A different owner cannot see the shop: same 404 as a missing id.
    let other = login_fresh(&app, "Mallory", "mallory@example.com").await;
    let res = get(&app, &other, &format!("/api/v1/barbershop/{shop_id}")).await;
    let body = body_with_status(res, 404).await;
    assert_eq!(body["error"], json!("Barbershop not found"));

    // Updating only the status leaves every other field untouched.
    let res = put_json(
        &app,
        &owner,
        &format!("/api/v1/appointment/{appointment_id}"),
        json!({ "status": "COMPLETO" }),
    )
    .await;
    let body = body_with_status(res, 200).await;
    assert_eq!(body["data"]["status"], json!("COMPLETO"));
    assert_eq!(body["data"]["client_name"], json!("Carlos"));
    assert_eq!(body["data"]["client_contact"], json!("555-123-4567"));
    assert_eq!(body["data"]["datetime"], json!("2026-03-01T10:00:00Z"));
    assert_eq!(
        body["message"],
        json!(format!("Carlos with id {appointment_id} updated successfully"))
    );

    // Read-one and read-many templates.
    let res = get(&app, &owner, &format!("/api/v1/appointment/{appointment_id}")).await;
    let body = body_with_status(res, 200).await;
    assert_eq!(
        body["message"],
        json!(format!("Details for Carlos with id {appointment_id}"))
    );

    let res = get(&app, &owner, "/api/v1/appointment").await;
    let body = body_with_status(res, 200).await;
    assert_eq!(body["message"], json!("Details for all appointments"));
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    // Delete, then the id is gone.
    let res = support::delete(&app, &owner, &format!("/api/v1/appointment/{appointment_id}")).await;
    let body = body_with_status(res, 200).await;
    assert_eq!(
        body["message"],
        json!(format!("Carlos with id {appointment_id} deleted successfully"))
    );

    let res = get(&app, &owner, &format!("/api/v1/appointment/{appointment_id}")).await;
    let body = body_with_status(res, 404).await;
    assert_eq!(body["error"], json!("Appointment not found"));
}

#[actix_web::test]
async fn requests_without_a_session_are_rejected() {
    let (_store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/barbershop").to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 401);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], json!("Invalid token"));
    assert_eq!(body["success"], json!(false));
}

#[actix_web::test]
async fn current_user_round_trips_through_the_session() {
    let (_store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;

    let cookie = login_fresh(&app, "Alice", "alice@example.com").await;
    let res = get(&app, &cookie, "/api/v1/login/me").await;
    let body = body_with_status(res, 200).await;
    assert_eq!(body["message"], json!("User authenticated"));
    assert_eq!(body["data"]["user"]["email"], json!("alice@example.com"));
}
