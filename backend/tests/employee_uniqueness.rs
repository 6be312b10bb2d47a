//! Employee creation: ownership, unknown users, and the one-binding rule.

mod support;

use actix_web::test;
use serde_json::json;

use support::{
    advisory_state, body_with_status, create_barbershop, create_employee, login_fresh, post_json,
    signup, test_app,
};

fn employee_payload(barbershop_id: &str, email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "role": "BARBEIRO",
        "phone_number": "555-0101-000",
        "barbershop_id": barbershop_id,
    })
}

/// Binding the same user twice fails with 409, even under a different shop
/// owned by a different principal.
#[actix_web::test]
async fn second_binding_for_a_user_conflicts_across_tenants() {
    let (_store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;

    signup(&app, "Bob", "bob@example.com").await;

    let alice = login_fresh(&app, "Alice", "alice@example.com").await;
    let shop_a = create_barbershop(&app, &alice, "Corner Cuts").await;
    create_employee(&app, &alice, &shop_a, "bob@example.com").await;

    // Same owner, second shop.
    let shop_b = create_barbershop(&app, &alice, "Fade Factory").await;
    let res = post_json(
        &app,
        &alice,
        "/api/v1/employee",
        employee_payload(&shop_b, "bob@example.com"),
    )
    .await;
    let body = body_with_status(res, 409).await;
    assert_eq!(body["error"], json!("User is already an employee"));

    // Different owner entirely.
    let carol = login_fresh(&app, "Carol", "carol@example.com").await;
    let shop_c = create_barbershop(&app, &carol, "Shear Genius").await;
    let res = post_json(
        &app,
        &carol,
        "/api/v1/employee",
        employee_payload(&shop_c, "bob@example.com"),
    )
    .await;
    let body = body_with_status(res, 409).await;
    assert_eq!(body["error"], json!("User is already an employee"));
}

/// Adding an employee to someone else's shop is an explicit denial.
#[actix_web::test]
async fn foreign_barbershop_reference_is_forbidden() {
    let (_store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;

    let alice = login_fresh(&app, "Alice", "alice@example.com").await;
    let shop_id = create_barbershop(&app, &alice, "Corner Cuts").await;
    signup(&app, "Bob", "bob@example.com").await;

    let intruder = login_fresh(&app, "Mallory", "mallory@example.com").await;
    let res = post_json(
        &app,
        &intruder,
        "/api/v1/employee",
        employee_payload(&shop_id, "bob@example.com"),
    )
    .await;
    let body = body_with_status(res, 403).await;
    assert_eq!(
        body["error"],
        json!("You can only add employees to your own barbershops")
    );
}

/// Referencing an email with no account is a 404 with field details.
#[actix_web::test]
async fn unknown_user_email_is_not_found() {
    let (_store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;

    let alice = login_fresh(&app, "Alice", "alice@example.com").await;
    let shop_id = create_barbershop(&app, &alice, "Corner Cuts").await;

    let res = post_json(
        &app,
        &alice,
        "/api/v1/employee",
        employee_payload(&shop_id, "ghost@example.com"),
    )
    .await;
    let body = body_with_status(res, 404).await;
    assert_eq!(body["error"], json!("User not found"));
    assert_eq!(
        body["details"],
        json!({ "email": "User with this email does not exist" })
    );
}

/// Duplicate signup emails conflict.
#[actix_web::test]
async fn duplicate_signup_email_conflicts() {
    let (_store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;

    signup(&app, "Bob", "bob@example.com").await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/signup")
            .set_json(json!({
                "name": "Bobby",
                "email": "bob@example.com",
                "password": support::PASSWORD,
            }))
            .to_request(),
    )
    .await;
    let body = body_with_status(res, 409).await;
    assert_eq!(body["error"], json!("Email already exists"));
    assert_eq!(body["details"], json!({ "email": "Email already in use" }));
}

/// Deleting a barbershop with live employees is rejected.
#[actix_web::test]
async fn barbershop_delete_is_rejected_while_dependents_exist() {
    let (_store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;

    let alice = login_fresh(&app, "Alice", "alice@example.com").await;
    signup(&app, "Bob", "bob@example.com").await;
    let shop_id = create_barbershop(&app, &alice, "Corner Cuts").await;
    let employee_id = create_employee(&app, &alice, &shop_id, "bob@example.com").await;

    let res = support::delete(&app, &alice, &format!("/api/v1/barbershop/{shop_id}")).await;
    let body = body_with_status(res, 409).await;
    assert_eq!(
        body["error"],
        json!("Barbershop still has employees or services")
    );

    // Remove the employee, then the shop can go.
    let res = support::delete(&app, &alice, &format!("/api/v1/employee/{employee_id}")).await;
    body_with_status(res, 200).await;
    let res = support::delete(&app, &alice, &format!("/api/v1/barbershop/{shop_id}")).await;
    body_with_status(res, 200).await;
}
