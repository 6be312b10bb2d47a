//! Partial-update semantics: omitted fields stay put, patches are
//! idempotent, identity fields never change. Both ownership strategies must
//! agree.

mod support;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use serde_json::{Value, json};

use support::{
    advisory_state, atomic_state, body_with_status, create_barbershop, create_service, get,
    login_fresh, put_json, test_app,
};

async fn run_partial_update_checks<S, B>(app: &S)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let owner = login_fresh(app, "Alice", "alice@example.com").await;
    let shop_id = create_barbershop(app, &owner, "Corner Cuts").await;
    let service_id = create_service(app, &owner, &shop_id, "Haircut").await;

    // Patch only the price.
    let patch = json!({ "price": 59.9 });
    let res = put_json(app, &owner, &format!("/api/v1/service/{service_id}"), patch.clone()).await;
    let body = body_with_status(res, 200).await;
    assert_eq!(body["data"]["price"], json!(59.9));
    assert_eq!(body["data"]["service_name"], json!("Haircut"));
    assert_eq!(body["data"]["time_taken"], json!(45));
    assert_eq!(body["data"]["barbershop_id"], json!(shop_id));

    // Applying the same patch again converges to the same state.
    let res = put_json(app, &owner, &format!("/api/v1/service/{service_id}"), patch).await;
    let twice = body_with_status(res, 200).await;
    assert_eq!(twice["data"]["price"], json!(59.9));
    assert_eq!(twice["data"]["service_name"], json!("Haircut"));
    assert_eq!(twice["data"]["time_taken"], json!(45));

    // An empty patch is a no-op that still succeeds.
    let res = put_json(app, &owner, &format!("/api/v1/service/{service_id}"), json!({})).await;
    let body = body_with_status(res, 200).await;
    assert_eq!(body["data"]["price"], json!(59.9));

    // The identity field is stripped, not applied.
    let res = put_json(
        app,
        &owner,
        &format!("/api/v1/service/{service_id}"),
        json!({ "barbershop_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "price": 19.9 }),
    )
    .await;
    let body = body_with_status(res, 200).await;
    assert_eq!(body["data"]["price"], json!(19.9));
    assert_eq!(body["data"]["barbershop_id"], json!(shop_id));

    // A provided field still has to satisfy its constraint.
    let res = put_json(
        app,
        &owner,
        &format!("/api/v1/service/{service_id}"),
        json!({ "price": -5 }),
    )
    .await;
    let body = body_with_status(res, 400).await;
    assert_eq!(body["error"], json!("Invalid fields"));
    assert_eq!(
        body["details"],
        json!([{ "field": "price", "message": "Price must be positive" }])
    );

    // The rejected patch left nothing behind.
    let res = get(app, &owner, &format!("/api/v1/service/{service_id}")).await;
    let body: Value = body_with_status(res, 200).await;
    assert_eq!(body["data"]["price"], json!(19.9));
}

#[actix_web::test]
async fn partial_updates_with_the_advisory_strategy() {
    let (_store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;
    run_partial_update_checks(&app).await;
}

#[actix_web::test]
async fn partial_updates_with_the_atomic_strategy() {
    let (_store, state) = atomic_state();
    let app = test::init_service(test_app(state)).await;
    run_partial_update_checks(&app).await;
}

/// Employee updates cannot rebind the user or the shop.
#[actix_web::test]
async fn employee_patch_ignores_identity_fields() {
    let (_store, state) = advisory_state();
    let app = test::init_service(test_app(state)).await;

    let owner = login_fresh(&app, "Alice", "alice@example.com").await;
    support::signup(&app, "Bob", "bob@example.com").await;
    let shop_id = create_barbershop(&app, &owner, "Corner Cuts").await;
    let employee_id = support::create_employee(&app, &owner, &shop_id, "bob@example.com").await;

    let res = put_json(
        &app,
        &owner,
        &format!("/api/v1/employee/{employee_id}"),
        json!({
            "role": "ATENDENTE",
            "email": "other@example.com",
            "barbershop_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        }),
    )
    .await;
    let body = body_with_status(res, 200).await;
    assert_eq!(body["data"]["role"], json!("ATENDENTE"));
    assert_eq!(body["data"]["phone_number"], json!("555-0101-000"));
    assert_eq!(body["data"]["barbershop_id"], json!(shop_id));
    assert_eq!(body["data"]["user"]["email"], json!("bob@example.com"));
}
