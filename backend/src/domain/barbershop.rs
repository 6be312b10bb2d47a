//! Barbershop data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::{BarbershopId, UserId};

/// Resource name used in envelope and denial messages.
pub const RESOURCE: &str = "Barbershop";

/// A barbershop owned by exactly one user.
///
/// Ownership is permanent: no operation reassigns `owner_id` after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barbershop {
    pub id: BarbershopId,
    pub owner_id: UserId,
    pub name: String,
    pub address: String,
    pub address_number: String,
    pub neighbourhood: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBarbershop {
    pub name: String,
    pub address: String,
    pub address_number: String,
    pub neighbourhood: String,
    #[serde(default)]
    pub landmark: Option<String>,
}

/// Partial update payload; omitted fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BarbershopPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub address_number: Option<String>,
    #[serde(default)]
    pub neighbourhood: Option<String>,
    #[serde(default)]
    pub landmark: Option<String>,
}

pub(crate) mod schemas {
    use std::sync::LazyLock;

    use regex::Regex;

    use crate::domain::validation::{Constraint, Field, Schema};

    fn address_number_constraint() -> Constraint {
        Constraint::Matches {
            regex: Regex::new(r"^\d+[A-Za-z]?$").unwrap_or_else(|error| {
                panic!("address number regex failed to compile: {error}")
            }),
            message: "Address number must be numeric (e.g. 123 or 123A)",
        }
    }

    /// Create payload schema.
    pub static CREATE: LazyLock<Schema> = LazyLock::new(|| {
        Schema::new(vec![
            Field::required(
                "name",
                "Name",
                Constraint::Text {
                    min: Some(3),
                    max: Some(50),
                },
            ),
            Field::required(
                "address",
                "Address",
                Constraint::Text {
                    min: Some(3),
                    max: Some(255),
                },
            ),
            Field::required("address_number", "Address number", address_number_constraint()),
            Field::required(
                "neighbourhood",
                "Neighbourhood",
                Constraint::Text {
                    min: Some(2),
                    max: Some(100),
                },
            ),
            Field::optional(
                "landmark",
                "Landmark",
                Constraint::Text {
                    min: None,
                    max: Some(100),
                },
            ),
        ])
    });

    /// Update schema, derived from the create schema. A barbershop has no
    /// identity fields in its payload, so only the optionality changes.
    pub static UPDATE: LazyLock<Schema> = LazyLock::new(|| CREATE.for_update(&[]));
}

#[cfg(test)]
mod tests {
    use super::schemas;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("123", true)]
    #[case("123A", true)]
    #[case("12b", true)]
    #[case("A12", false)]
    #[case("12-3", false)]
    fn address_number_pattern(#[case] input: &str, #[case] valid: bool) {
        let payload = json!({
            "name": "Corner Cuts",
            "address": "High Street",
            "address_number": input,
            "neighbourhood": "Old Town",
        });
        assert_eq!(schemas::CREATE.validate(&payload).is_ok(), valid, "input: {input}");
    }

    #[test]
    fn landmark_is_optional_on_create() {
        let payload = json!({
            "name": "Corner Cuts",
            "address": "High Street",
            "address_number": "12",
            "neighbourhood": "Old Town",
        });
        schemas::CREATE.validate(&payload).expect("landmark omitted");
    }

    #[test]
    fn update_schema_accepts_a_single_field() {
        schemas::UPDATE
            .validate(&json!({ "name": "Corner Cuts & Co" }))
            .expect("partial update");
    }
}
