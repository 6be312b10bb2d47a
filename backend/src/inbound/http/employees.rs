//! Employee handlers.
//!
//! ```text
//! POST   /api/v1/employee
//! GET    /api/v1/employee
//! GET    /api/v1/employee/{id}
//! PUT    /api/v1/employee/{id}
//! DELETE /api/v1/employee/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::EmployeeId;
use crate::domain::employee::{self, EmployeePatch, NewEmployee};
use crate::inbound::http::envelope;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::payload::from_validated;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[post("/employee")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let value = payload.into_inner();
    employee::schemas::CREATE.check(&value)?;
    let request: NewEmployee = from_validated(value)?;

    let created = state.employees.create(owner, request).await?;
    Ok(envelope::created(&created.user.name.clone(), created.id, created))
}

#[get("/employee")]
pub async fn list(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let employees = state.employees.list(owner).await?;
    Ok(envelope::read_many("employee", employees))
}

#[get("/employee/{id}")]
pub async fn get_by_id(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let found = state
        .employees
        .get(owner, EmployeeId::new(id.into_inner()))
        .await?;
    Ok(envelope::read_one(&found.user.name.clone(), found.id, found))
}

#[put("/employee/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let value = payload.into_inner();
    employee::schemas::UPDATE.check(&value)?;
    let patch: EmployeePatch = from_validated(value)?;

    let updated = state
        .employees
        .update(owner, EmployeeId::new(id.into_inner()), patch)
        .await?;
    Ok(envelope::updated(&updated.user.name.clone(), updated.id, updated))
}

#[delete("/employee/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let removed = state
        .employees
        .delete(owner, EmployeeId::new(id.into_inner()))
        .await?;
    Ok(envelope::deleted(&removed.user.name.clone(), removed.id, removed))
}
