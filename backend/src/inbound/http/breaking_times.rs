//! Breaking time handlers.
//!
//! ```text
//! POST   /api/v1/breakingtime
//! GET    /api/v1/breakingtime
//! GET    /api/v1/breakingtime/{id}
//! PUT    /api/v1/breakingtime/{id}
//! DELETE /api/v1/breakingtime/{id}
//! ```
//!
//! Breaking times have no display name of their own; messages use the fixed
//! "Breaking Time" label.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::BreakingTimeId;
use crate::domain::breaking_time::{self, BreakingTimePatch, NewBreakingTime};
use crate::inbound::http::envelope;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::payload::from_validated;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const DISPLAY_NAME: &str = "Breaking Time";

#[post("/breakingtime")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let value = payload.into_inner();
    breaking_time::schemas::CREATE.check(&value)?;
    let request: NewBreakingTime = from_validated(value)?;

    let created = state.breaking_times.create(owner, request).await?;
    Ok(envelope::created(DISPLAY_NAME, created.id, created))
}

#[get("/breakingtime")]
pub async fn list(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let breaking_times = state.breaking_times.list(owner).await?;
    Ok(envelope::read_many("breakingtime", breaking_times))
}

#[get("/breakingtime/{id}")]
pub async fn get_by_id(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let found = state
        .breaking_times
        .get(owner, BreakingTimeId::new(id.into_inner()))
        .await?;
    Ok(envelope::read_one(DISPLAY_NAME, found.id, found))
}

#[put("/breakingtime/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let value = payload.into_inner();
    breaking_time::schemas::UPDATE.check(&value)?;
    let patch: BreakingTimePatch = from_validated(value)?;

    let updated = state
        .breaking_times
        .update(owner, BreakingTimeId::new(id.into_inner()), patch)
        .await?;
    Ok(envelope::updated(DISPLAY_NAME, updated.id, updated))
}

#[delete("/breakingtime/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let removed = state
        .breaking_times
        .delete(owner, BreakingTimeId::new(id.into_inner()))
        .await?;
    Ok(envelope::deleted(DISPLAY_NAME, removed.id, removed))
}
