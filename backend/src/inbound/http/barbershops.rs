//! Barbershop handlers.
//!
//! ```text
//! POST   /api/v1/barbershop
//! GET    /api/v1/barbershop
//! GET    /api/v1/barbershop/{id}
//! PUT    /api/v1/barbershop/{id}
//! DELETE /api/v1/barbershop/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::BarbershopId;
use crate::domain::barbershop::{self, BarbershopPatch, NewBarbershop};
use crate::inbound::http::envelope;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::payload::from_validated;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[post("/barbershop")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let value = payload.into_inner();
    barbershop::schemas::CREATE.check(&value)?;
    let request: NewBarbershop = from_validated(value)?;

    let created = state.barbershops.create(owner, request).await?;
    Ok(envelope::created(&created.name.clone(), created.id, created))
}

#[get("/barbershop")]
pub async fn list(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let barbershops = state.barbershops.list(owner).await?;
    Ok(envelope::read_many("barbershop", barbershops))
}

#[get("/barbershop/{id}")]
pub async fn get_by_id(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let shop = state
        .barbershops
        .get(owner, BarbershopId::new(id.into_inner()))
        .await?;
    Ok(envelope::read_one(&shop.name.clone(), shop.id, shop))
}

#[put("/barbershop/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let value = payload.into_inner();
    barbershop::schemas::UPDATE.check(&value)?;
    let patch: BarbershopPatch = from_validated(value)?;

    let updated = state
        .barbershops
        .update(owner, BarbershopId::new(id.into_inner()), patch)
        .await?;
    Ok(envelope::updated(&updated.name.clone(), updated.id, updated))
}

#[delete("/barbershop/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let removed = state
        .barbershops
        .delete(owner, BarbershopId::new(id.into_inner()))
        .await?;
    Ok(envelope::deleted(&removed.name.clone(), removed.id, removed))
}
