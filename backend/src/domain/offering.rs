//! Service offering data model.
//!
//! "Service" in the wire format; named `ServiceOffering` in the domain to
//! keep it distinct from the application services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::{BarbershopId, ServiceOfferingId};

/// Resource name used in denial messages.
pub const RESOURCE: &str = "Service";

/// A priced service offered by a barbershop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: ServiceOfferingId,
    pub barbershop_id: BarbershopId,
    pub service_name: String,
    pub price: f64,
    /// Duration in minutes.
    pub time_taken: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewServiceOffering {
    pub service_name: String,
    pub price: f64,
    pub time_taken: i32,
    pub barbershop_id: BarbershopId,
}

/// Partial update payload; `barbershop_id` is identity and cannot change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceOfferingPatch {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub time_taken: Option<i32>,
}

pub(crate) mod schemas {
    use std::sync::LazyLock;

    use crate::domain::validation::{Constraint, Field, Schema};

    /// Create payload schema.
    pub static CREATE: LazyLock<Schema> = LazyLock::new(|| {
        Schema::new(vec![
            Field::required(
                "service_name",
                "Service name",
                Constraint::Text {
                    min: Some(3),
                    max: Some(100),
                },
            ),
            Field::required("price", "Price", Constraint::Number { max: 9999.99 }),
            Field::required(
                "time_taken",
                "Time taken",
                Constraint::Integer {
                    max: 480,
                    max_message: Some("Time taken must be at most 480 minutes (8 hours)"),
                },
            ),
            Field::required("barbershop_id", "Barbershop id", Constraint::Uuid),
        ])
    });

    /// Update schema: derived by dropping the owning barbershop.
    pub static UPDATE: LazyLock<Schema> = LazyLock::new(|| CREATE.for_update(&["barbershop_id"]));
}

#[cfg(test)]
mod tests {
    use super::schemas;
    use serde_json::json;

    #[test]
    fn create_schema_accepts_a_priced_offering() {
        schemas::CREATE
            .validate(&json!({
                "service_name": "Haircut",
                "price": 49.9,
                "time_taken": 45,
                "barbershop_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            }))
            .expect("valid offering");
    }

    #[test]
    fn update_schema_allows_price_only() {
        schemas::UPDATE
            .validate(&json!({ "price": 59.9 }))
            .expect("price-only update");
    }
}
