//! Uniform success envelope and message templating.
//!
//! Every successful operation responds with the same shape:
//! `{ "success": true, "statusCode": N, "message": ..., "data": ... }`.
//! Messages come from one formatter keyed by operation kind so the format
//! stays centrally testable instead of being rebuilt per route.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

/// The operation kinds the formatter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Create,
    ReadOne,
    ReadMany,
    Update,
    Delete,
}

impl OperationKind {
    /// Status code fixed per operation kind.
    pub const fn status(self) -> StatusCode {
        match self {
            Self::Create => StatusCode::CREATED,
            Self::ReadOne | Self::ReadMany | Self::Update | Self::Delete => StatusCode::OK,
        }
    }
}

/// Render the success message for an operation.
///
/// `name` is the resource's display name for per-id operations, or the
/// singular object name for [`OperationKind::ReadMany`] (which pluralizes by
/// appending `s`). `id` is ignored for read-many.
pub fn success_message(kind: OperationKind, name: &str, id: Option<&str>) -> String {
    let id = id.unwrap_or_default();
    match kind {
        OperationKind::Create => format!("{name} with id {id} created successfully"),
        OperationKind::ReadOne => format!("Details for {name} with id {id}"),
        OperationKind::ReadMany => format!("Details for all {name}s"),
        OperationKind::Update => format!("{name} with id {id} updated successfully"),
        OperationKind::Delete => format!("{name} with id {id} deleted successfully"),
    }
}

#[derive(Debug, Serialize)]
struct Envelope<T: Serialize> {
    success: bool,
    #[serde(rename = "statusCode")]
    status_code: u16,
    message: String,
    data: T,
}

fn respond<T: Serialize>(status: StatusCode, message: String, data: T) -> HttpResponse {
    HttpResponse::build(status).json(Envelope {
        success: true,
        status_code: status.as_u16(),
        message,
        data,
    })
}

fn respond_with(
    kind: OperationKind,
    name: &str,
    id: Option<&str>,
    data: impl Serialize,
) -> HttpResponse {
    respond(kind.status(), success_message(kind, name, id), data)
}

/// 201 response for a created resource.
pub fn created(name: &str, id: impl ToString, data: impl Serialize) -> HttpResponse {
    let id = id.to_string();
    respond_with(OperationKind::Create, name, Some(id.as_str()), data)
}

/// 200 response for a single fetched resource.
pub fn read_one(name: &str, id: impl ToString, data: impl Serialize) -> HttpResponse {
    let id = id.to_string();
    respond_with(OperationKind::ReadOne, name, Some(id.as_str()), data)
}

/// 200 response for a fetched collection.
pub fn read_many(object: &str, data: impl Serialize) -> HttpResponse {
    respond_with(OperationKind::ReadMany, object, None, data)
}

/// 200 response for an updated resource.
pub fn updated(name: &str, id: impl ToString, data: impl Serialize) -> HttpResponse {
    let id = id.to_string();
    respond_with(OperationKind::Update, name, Some(id.as_str()), data)
}

/// 200 response for a deleted resource.
pub fn deleted(name: &str, id: impl ToString, data: impl Serialize) -> HttpResponse {
    let id = id.to_string();
    respond_with(OperationKind::Delete, name, Some(id.as_str()), data)
}

/// 200 response with a custom message, for operations outside the CRUD
/// template (login, current-user).
pub fn ok(message: &str, data: impl Serialize) -> HttpResponse {
    respond(StatusCode::OK, message.to_owned(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        OperationKind::Create,
        "Haircut",
        Some("42"),
        "Haircut with id 42 created successfully"
    )]
    #[case(OperationKind::ReadOne, "Haircut", Some("42"), "Details for Haircut with id 42")]
    #[case(OperationKind::ReadMany, "appointment", None, "Details for all appointments")]
    #[case(
        OperationKind::Update,
        "Haircut",
        Some("42"),
        "Haircut with id 42 updated successfully"
    )]
    #[case(
        OperationKind::Delete,
        "Haircut",
        Some("42"),
        "Haircut with id 42 deleted successfully"
    )]
    fn message_templates(
        #[case] kind: OperationKind,
        #[case] name: &str,
        #[case] id: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(success_message(kind, name, id), expected);
    }

    #[test]
    fn create_status_is_201_and_the_rest_200() {
        assert_eq!(OperationKind::Create.status(), StatusCode::CREATED);
        assert_eq!(OperationKind::ReadMany.status(), StatusCode::OK);
        assert_eq!(OperationKind::Delete.status(), StatusCode::OK);
    }
}
