//! Employee data model.
//!
//! An employee binds one existing user to one barbershop. The bound user is
//! carried eagerly so envelope messages and responses can use the person's
//! name without a second lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::{BarbershopId, EmployeeId, UserId};
use crate::domain::user::User;

/// Resource name used in denial messages.
pub const RESOURCE: &str = "Employee";

/// Role an employee performs at the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeRole {
    #[serde(rename = "BARBEIRO")]
    Barber,
    #[serde(rename = "ATENDENTE")]
    Attendant,
}

impl EmployeeRole {
    /// Stable wire/storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Barber => "BARBEIRO",
            Self::Attendant => "ATENDENTE",
        }
    }

    /// Parse the storage representation.
    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "BARBEIRO" => Some(Self::Barber),
            "ATENDENTE" => Some(Self::Attendant),
            _ => None,
        }
    }
}

/// An employee of a barbershop.
///
/// ## Invariants
/// - `user` is bound as an employee at most once system-wide.
/// - `barbershop_id` never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub user: User,
    pub barbershop_id: BarbershopId,
    pub role: EmployeeRole,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload; the user is referenced by email and resolved by
/// the consistency checks before insertion.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    pub email: String,
    pub role: EmployeeRole,
    pub phone_number: String,
    pub barbershop_id: BarbershopId,
}

/// Insert-shape record for the employee store, produced after the referenced
/// user has been resolved.
#[derive(Debug, Clone)]
pub struct NewEmployeeRecord {
    pub user_id: UserId,
    pub barbershop_id: BarbershopId,
    pub role: EmployeeRole,
    pub phone_number: String,
}

/// Partial update payload. Identity fields (`email`, `barbershop_id`) are
/// not part of this shape and cannot change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeePatch {
    #[serde(default)]
    pub role: Option<EmployeeRole>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

pub(crate) mod schemas {
    use std::sync::LazyLock;

    use crate::domain::validation::{Constraint, Field, Schema};

    /// Create payload schema.
    pub static CREATE: LazyLock<Schema> = LazyLock::new(|| {
        Schema::new(vec![
            Field::required("email", "Email", Constraint::Email),
            Field::required("role", "Role", Constraint::OneOf(&["BARBEIRO", "ATENDENTE"])),
            Field::required(
                "phone_number",
                "Phone number",
                Constraint::Text { min: None, max: None },
            ),
            Field::required("barbershop_id", "Barbershop id", Constraint::Uuid),
        ])
    });

    /// Update schema: derived by dropping the identity fields.
    pub static UPDATE: LazyLock<Schema> =
        LazyLock::new(|| CREATE.for_update(&["barbershop_id", "email"]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_round_trips_through_wire_names() {
        let json = serde_json::to_value(EmployeeRole::Barber).expect("serialize role");
        assert_eq!(json, json!("BARBEIRO"));
        let parsed: EmployeeRole = serde_json::from_value(json).expect("deserialize role");
        assert_eq!(parsed, EmployeeRole::Barber);
    }

    #[test]
    fn update_schema_ignores_identity_fields() {
        schemas::UPDATE
            .validate(&json!({
                "email": "not-an-email",
                "barbershop_id": "not-a-uuid",
                "role": "ATENDENTE",
            }))
            .expect("identity fields stripped");
    }

    #[test]
    fn create_schema_rejects_unknown_role() {
        let violations = schemas::CREATE
            .validate(&json!({
                "email": "bob@example.com",
                "role": "MANAGER",
                "phone_number": "555-0101",
                "barbershop_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            }))
            .expect_err("unknown role");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.first().map(|v| v.field.as_str()), Some("role"));
    }
}
