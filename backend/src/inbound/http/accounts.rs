//! Account handlers: signup, login, current user.
//!
//! ```text
//! POST /api/v1/signup
//! POST /api/v1/login
//! GET  /api/v1/login/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde_json::{Value, json};

use crate::domain::user::{self, LoginRequest, SignupRequest};
use crate::inbound::http::envelope;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::payload::from_validated;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Register a new account.
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let value = payload.into_inner();
    user::schemas::SIGNUP.check(&value)?;
    let request: SignupRequest = from_validated(value)?;

    let created = state.accounts.signup(request).await?;
    Ok(envelope::created(&created.email.clone(), created.id, created))
}

/// Verify credentials and establish a session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let value = payload.into_inner();
    user::schemas::LOGIN.check(&value)?;
    let request: LoginRequest = from_validated(value)?;

    let account = state.accounts.login(request).await?;
    session.persist_user(account.id)?;
    Ok(envelope::ok("Login successful", json!({ "user": account })))
}

/// Return the account behind the current session.
#[get("/login/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let account = state.accounts.fetch_user(user_id).await?;
    Ok(envelope::ok("User authenticated", json!({ "user": account })))
}
