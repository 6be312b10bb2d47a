//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while giving every
//! failure the same envelope:
//! `{ "success": false, "statusCode": N, "error": ..., "details"? }`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    success: bool,
    #[serde(rename = "statusCode")]
    status_code: u16,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Internal messages are for logs, not clients.
        let (message, details) = if self.code() == ErrorCode::InternalError {
            error!(error = %self, "internal error reached the HTTP boundary");
            ("Internal Server Error", None)
        } else {
            (self.message(), self.details())
        };

        HttpResponse::build(status).json(ErrorEnvelope {
            success: false,
            status_code: status.as_u16(),
            error: message,
            details,
        })
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Error::invalid_request("Invalid fields"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("Invalid token"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("nope"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("Appointment not found"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("User is already an employee"), StatusCode::CONFLICT)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_fixed_statuses(#[case] error: Error, #[case] status: StatusCode) {
        assert_eq!(error.status_code(), status);
    }

    #[actix_rt::test]
    async fn envelope_carries_message_and_details() {
        let error = Error::not_found("User not found")
            .with_details(json!({ "email": "User with this email does not exist" }));
        let response = error.error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let value: Value = serde_json::from_slice(&body).expect("json body");

        assert_eq!(
            value,
            json!({
                "success": false,
                "statusCode": 404,
                "error": "User not found",
                "details": { "email": "User with this email does not exist" },
            })
        );
    }

    #[actix_rt::test]
    async fn internal_messages_are_redacted() {
        let error = Error::internal("connection string leaked");
        let response = error.error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let value: Value = serde_json::from_slice(&body).expect("json body");

        assert_eq!(value.get("error"), Some(&json!("Internal Server Error")));
        assert_eq!(value.get("details"), None);
    }
}
