//! Appointment handlers.
//!
//! ```text
//! POST   /api/v1/appointment
//! GET    /api/v1/appointment
//! GET    /api/v1/appointment/{id}
//! PUT    /api/v1/appointment/{id}
//! DELETE /api/v1/appointment/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::AppointmentId;
use crate::domain::appointment::{self, AppointmentPatch, NewAppointment};
use crate::inbound::http::envelope;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::payload::from_validated;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[post("/appointment")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let value = payload.into_inner();
    appointment::schemas::CREATE.check(&value)?;
    let request: NewAppointment = from_validated(value)?;

    let created = state.appointments.create(owner, request).await?;
    Ok(envelope::created(&created.client_name.clone(), created.id, created))
}

#[get("/appointment")]
pub async fn list(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let appointments = state.appointments.list(owner).await?;
    Ok(envelope::read_many("appointment", appointments))
}

#[get("/appointment/{id}")]
pub async fn get_by_id(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let found = state
        .appointments
        .get(owner, AppointmentId::new(id.into_inner()))
        .await?;
    Ok(envelope::read_one(&found.client_name.clone(), found.id, found))
}

#[put("/appointment/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let value = payload.into_inner();
    appointment::schemas::UPDATE.check(&value)?;
    let patch: AppointmentPatch = from_validated(value)?;

    let updated = state
        .appointments
        .update(owner, AppointmentId::new(id.into_inner()), patch)
        .await?;
    Ok(envelope::updated(&updated.client_name.clone(), updated.id, updated))
}

#[delete("/appointment/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let removed = state
        .appointments
        .delete(owner, AppointmentId::new(id.into_inner()))
        .await?;
    Ok(envelope::deleted(&removed.client_name.clone(), removed.id, removed))
}
