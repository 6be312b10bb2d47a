//! Service offering handlers.
//!
//! ```text
//! POST   /api/v1/service
//! GET    /api/v1/service
//! GET    /api/v1/service/{id}
//! PUT    /api/v1/service/{id}
//! DELETE /api/v1/service/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::ServiceOfferingId;
use crate::domain::offering::{self, NewServiceOffering, ServiceOfferingPatch};
use crate::inbound::http::envelope;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::payload::from_validated;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[post("/service")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let value = payload.into_inner();
    offering::schemas::CREATE.check(&value)?;
    let request: NewServiceOffering = from_validated(value)?;

    let created = state.offerings.create(owner, request).await?;
    Ok(envelope::created(&created.service_name.clone(), created.id, created))
}

#[get("/service")]
pub async fn list(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let offerings = state.offerings.list(owner).await?;
    Ok(envelope::read_many("service", offerings))
}

#[get("/service/{id}")]
pub async fn get_by_id(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let found = state
        .offerings
        .get(owner, ServiceOfferingId::new(id.into_inner()))
        .await?;
    Ok(envelope::read_one(&found.service_name.clone(), found.id, found))
}

#[put("/service/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let value = payload.into_inner();
    offering::schemas::UPDATE.check(&value)?;
    let patch: ServiceOfferingPatch = from_validated(value)?;

    let updated = state
        .offerings
        .update(owner, ServiceOfferingId::new(id.into_inner()), patch)
        .await?;
    Ok(envelope::updated(&updated.service_name.clone(), updated.id, updated))
}

#[delete("/service/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let removed = state
        .offerings
        .delete(owner, ServiceOfferingId::new(id.into_inner()))
        .await?;
    Ok(envelope::deleted(&removed.service_name.clone(), removed.id, removed))
}
