//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod accounts;
pub mod appointments;
pub mod barbershops;
pub mod breaking_times;
pub mod employees;
pub mod envelope;
pub mod error;
pub mod offerings;
pub mod payload;
pub mod session;
pub mod state;

pub use error::ApiResult;

/// Register every handler on a service config.
///
/// The caller owns the surrounding scope and middleware; both the server
/// bootstrap and the test harness mount this under `/api/v1` behind the
/// session middleware.
pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::signup)
        .service(accounts::login)
        .service(accounts::current_user)
        .service(barbershops::create)
        .service(barbershops::list)
        .service(barbershops::get_by_id)
        .service(barbershops::update)
        .service(barbershops::remove)
        .service(employees::create)
        .service(employees::list)
        .service(employees::get_by_id)
        .service(employees::update)
        .service(employees::remove)
        .service(offerings::create)
        .service(offerings::list)
        .service(offerings::get_by_id)
        .service(offerings::update)
        .service(offerings::remove)
        .service(appointments::create)
        .service(appointments::list)
        .service(appointments::get_by_id)
        .service(appointments::update)
        .service(appointments::remove)
        .service(breaking_times::create)
        .service(breaking_times::list)
        .service(breaking_times::get_by_id)
        .service(breaking_times::update)
        .service(breaking_times::remove);
}
