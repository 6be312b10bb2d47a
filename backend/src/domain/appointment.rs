//! Appointment data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::{AppointmentId, EmployeeId, ServiceOfferingId};

/// Resource name used in denial messages.
pub const RESOURCE: &str = "Appointment";

/// Lifecycle status of an appointment.
///
/// The wire values are the Portuguese names clients already send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "PENDENTE")]
    Pending,
    #[serde(rename = "COMPLETO")]
    Complete,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

impl AppointmentStatus {
    /// Stable wire/storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDENTE",
            Self::Complete => "COMPLETO",
            Self::Cancelled => "CANCELADO",
        }
    }

    /// Parse the storage representation.
    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "PENDENTE" => Some(Self::Pending),
            "COMPLETO" => Some(Self::Complete),
            "CANCELADO" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// A booked appointment.
///
/// ## Invariants
/// - The employee's barbershop equals the service's barbershop; enforced at
///   creation and immutable afterwards (`employee_id` and `service_id` never
///   change).
/// - `status` starts as [`AppointmentStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub employee_id: EmployeeId,
    pub service_id: ServiceOfferingId,
    pub client_name: String,
    pub client_contact: String,
    pub datetime: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAppointment {
    pub client_name: String,
    pub client_contact: String,
    pub datetime: DateTime<Utc>,
    pub employee_id: EmployeeId,
    pub service_id: ServiceOfferingId,
}

/// Insert-shape record for the appointment store, produced after the
/// consistency checks with the lifecycle status decided.
#[derive(Debug, Clone)]
pub struct NewAppointmentRecord {
    pub client_name: String,
    pub client_contact: String,
    pub datetime: DateTime<Utc>,
    pub employee_id: EmployeeId,
    pub service_id: ServiceOfferingId,
    pub status: AppointmentStatus,
}

impl NewAppointmentRecord {
    /// Build the initial record for a freshly validated create payload.
    pub fn pending(request: NewAppointment) -> Self {
        Self {
            client_name: request.client_name,
            client_contact: request.client_contact,
            datetime: request.datetime,
            employee_id: request.employee_id,
            service_id: request.service_id,
            status: AppointmentStatus::Pending,
        }
    }
}

/// Partial update payload. The employee and service references are identity
/// fields and cannot change; `status` only exists for updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentPatch {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_contact: Option<String>,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
}

pub(crate) mod schemas {
    use std::sync::LazyLock;

    use crate::domain::validation::{Constraint, Field, Schema};

    /// Create payload schema.
    pub static CREATE: LazyLock<Schema> = LazyLock::new(|| {
        Schema::new(vec![
            Field::required(
                "client_name",
                "Client name",
                Constraint::Text {
                    min: Some(2),
                    max: Some(100),
                },
            ),
            Field::required(
                "client_contact",
                "Client contact",
                Constraint::Text {
                    min: Some(10),
                    max: Some(20),
                },
            ),
            Field::required("datetime", "Datetime", Constraint::DateTime),
            Field::required("employee_id", "Employee id", Constraint::Uuid),
            Field::required("service_id", "Service id", Constraint::Uuid),
        ])
    });

    /// Update schema: derived by dropping the identity references, then
    /// extended with the status transition field that only exists for
    /// updates.
    pub static UPDATE: LazyLock<Schema> = LazyLock::new(|| {
        CREATE
            .for_update(&["employee_id", "service_id"])
            .with_optional_field(Field::optional(
                "status",
                "Status",
                Constraint::OneOf(&["PENDENTE", "COMPLETO", "CANCELADO"]),
            ))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(AppointmentStatus::Pending, "PENDENTE")]
    #[case(AppointmentStatus::Complete, "COMPLETO")]
    #[case(AppointmentStatus::Cancelled, "CANCELADO")]
    fn status_wire_names(#[case] status: AppointmentStatus, #[case] wire: &str) {
        assert_eq!(status.as_str(), wire);
        assert_eq!(AppointmentStatus::from_str_opt(wire), Some(status));
        assert_eq!(
            serde_json::to_value(status).expect("serialize status"),
            json!(wire)
        );
    }

    #[test]
    fn update_schema_accepts_a_status_only_patch() {
        schemas::UPDATE
            .validate(&json!({ "status": "COMPLETO" }))
            .expect("status-only update");
    }

    #[test]
    fn update_schema_ignores_identity_references() {
        schemas::UPDATE
            .validate(&json!({
                "employee_id": "not-a-uuid",
                "service_id": "not-a-uuid",
            }))
            .expect("identity references stripped");
    }

    #[test]
    fn create_schema_rejects_invalid_datetime() {
        let violations = schemas::CREATE
            .validate(&json!({
                "client_name": "Jo",
                "client_contact": "555-000-1234",
                "datetime": "tomorrow at noon",
                "employee_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "service_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            }))
            .expect_err("bad datetime");
        assert_eq!(
            violations.first().map(|v| v.message.as_str()),
            Some("Invalid datetime format")
        );
    }
}
