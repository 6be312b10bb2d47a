//! Shared harness for HTTP integration tests.
//!
//! Mounts the full REST surface over the in-memory adapters, with the same
//! session middleware shape as production (ephemeral key, insecure cookies).

#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, test, web};
use serde_json::Value;

use backend::domain::ports::FixturePasswordScheme;
use backend::domain::{
    AccountService, AdvisoryScope, AppointmentService, AtomicScope, BarbershopService,
    BreakingTimeService, EmployeeService, MutationScope, ServiceOfferingService,
};
use backend::inbound::http::payload::{json_config, path_config};
use backend::inbound::http::register;
use backend::inbound::http::state::HttpState;
use backend::test_support::{
    AppointmentView, BreakingTimeView, EmployeeView, InMemoryStore, OfferingView,
};

/// Password used for every test account.
pub const PASSWORD: &str = "s3cret-pw";

fn assemble<S: MutationScope + Clone + 'static>(
    store: &Arc<InMemoryStore>,
    scope: S,
) -> HttpState {
    HttpState {
        accounts: Arc::new(AccountService::new(
            store.clone(),
            Arc::new(FixturePasswordScheme),
        )),
        barbershops: Arc::new(BarbershopService::new(
            store.clone(),
            Arc::new(EmployeeView(store.clone())),
            Arc::new(OfferingView(store.clone())),
            scope.clone(),
        )),
        employees: Arc::new(EmployeeService::new(
            Arc::new(EmployeeView(store.clone())),
            store.clone(),
            store.clone(),
            store.clone(),
            scope.clone(),
        )),
        offerings: Arc::new(ServiceOfferingService::new(
            Arc::new(OfferingView(store.clone())),
            store.clone(),
            scope.clone(),
        )),
        appointments: Arc::new(AppointmentService::new(
            Arc::new(AppointmentView(store.clone())),
            Arc::new(EmployeeView(store.clone())),
            Arc::new(OfferingView(store.clone())),
            scope.clone(),
        )),
        breaking_times: Arc::new(BreakingTimeService::new(
            Arc::new(BreakingTimeView(store.clone())),
            store.clone(),
            scope,
        )),
    }
}

/// Build state over a fresh store with the advisory (default) strategy.
pub fn advisory_state() -> (Arc<InMemoryStore>, HttpState) {
    let store = Arc::new(InMemoryStore::new());
    let state = assemble(&store, AdvisoryScope);
    (store, state)
}

/// Build state over a fresh store with the atomic-conditional strategy.
pub fn atomic_state() -> (Arc<InMemoryStore>, HttpState) {
    let store = Arc::new(InMemoryStore::new());
    let state = assemble(&store, AtomicScope);
    (store, state)
}

fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .build()
}

/// App factory mirroring the production wiring.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(path_config())
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(register))
}

/// Sign up an account and return the created user id as a string.
pub async fn signup<S, B>(app: &S, name: &str, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/signup")
            .set_json(serde_json::json!({
                "name": name,
                "email": email,
                "password": PASSWORD,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 201, "signup should succeed");
    let body: Value = test::read_body_json(res).await;
    body["data"]["id"]
        .as_str()
        .expect("created user id")
        .to_owned()
}

/// Log in and return the session cookie.
pub async fn login<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({ "email": email, "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200, "login should succeed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Sign up and log in, returning the session cookie.
pub async fn login_fresh<S, B>(app: &S, name: &str, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    signup(app, name, email).await;
    login(app, email).await
}

pub async fn post_json<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    path: &str,
    body: Value,
) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri(path)
            .cookie(cookie.clone())
            .set_json(body)
            .to_request(),
    )
    .await
}

pub async fn put_json<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    path: &str,
    body: Value,
) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    test::call_service(
        app,
        test::TestRequest::put()
            .uri(path)
            .cookie(cookie.clone())
            .set_json(body)
            .to_request(),
    )
    .await
}

pub async fn get<S, B>(app: &S, cookie: &Cookie<'static>, path: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    test::call_service(
        app,
        test::TestRequest::get()
            .uri(path)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await
}

pub async fn delete<S, B>(app: &S, cookie: &Cookie<'static>, path: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    test::call_service(
        app,
        test::TestRequest::delete()
            .uri(path)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await
}

/// Read a response body as JSON, asserting the expected status first.
pub async fn body_with_status<B>(res: ServiceResponse<B>, status: u16) -> Value
where
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    assert_eq!(
        res.status().as_u16(),
        status,
        "unexpected status for response"
    );
    test::read_body_json(res).await
}

/// Create a barbershop and return its id.
pub async fn create_barbershop<S, B>(app: &S, cookie: &Cookie<'static>, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let res = post_json(
        app,
        cookie,
        "/api/v1/barbershop",
        serde_json::json!({
            "name": name,
            "address": "High Street",
            "address_number": "12A",
            "neighbourhood": "Old Town",
        }),
    )
    .await;
    let body = body_with_status(res, 201).await;
    body["data"]["id"].as_str().expect("barbershop id").to_owned()
}

/// Create an employee bound to `email` under `barbershop_id`, returning the
/// employee id.
pub async fn create_employee<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    barbershop_id: &str,
    email: &str,
) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let res = post_json(
        app,
        cookie,
        "/api/v1/employee",
        serde_json::json!({
            "email": email,
            "role": "BARBEIRO",
            "phone_number": "555-0101-000",
            "barbershop_id": barbershop_id,
        }),
    )
    .await;
    let body = body_with_status(res, 201).await;
    body["data"]["id"].as_str().expect("employee id").to_owned()
}

/// Create a service offering under `barbershop_id`, returning its id.
pub async fn create_service<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    barbershop_id: &str,
    name: &str,
) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let res = post_json(
        app,
        cookie,
        "/api/v1/service",
        serde_json::json!({
            "service_name": name,
            "price": 49.9,
            "time_taken": 45,
            "barbershop_id": barbershop_id,
        }),
    )
    .await;
    let body = body_with_status(res, 201).await;
    body["data"]["id"].as_str().expect("service id").to_owned()
}
