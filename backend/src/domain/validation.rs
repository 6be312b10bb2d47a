//! Payload validation against per-operation schema descriptors.
//!
//! Every mutating operation owns a create schema; its partial-update schema is
//! *derived* from the create schema with [`Schema::for_update`] (drop the
//! identity fields, mark the remainder optional) so the two can never drift
//! apart. Validation walks the raw JSON body and reports every failing field
//! in a single pass; callers deserialize into typed payloads only after the
//! schema accepted the value.

use chrono::DateTime;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::Error;

/// One failing field, reported as a `(field, message)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Convert a violation list into the uniform 400 error.
pub fn invalid_fields(violations: Vec<FieldViolation>) -> Error {
    let details = serde_json::to_value(violations)
        .unwrap_or_else(|_| Value::Array(Vec::new()));
    Error::invalid_request("Invalid fields").with_details(details)
}

/// Constraint applied to a single field value.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// String with optional character-count bounds.
    Text {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// String matching a pattern, reported with a fixed message.
    Matches { regex: Regex, message: &'static str },
    /// Positive JSON number with an inclusive upper bound.
    Number { max: f64 },
    /// Positive integer with an inclusive upper bound.
    Integer {
        max: i64,
        max_message: Option<&'static str>,
    },
    /// String drawn from a fixed set of options.
    OneOf(&'static [&'static str]),
    /// RFC 5322-ish email address.
    Email,
    /// Canonical UUID string.
    Uuid,
    /// `HH:MM` time of day.
    TimeOfDay,
    /// Full ISO-8601 datetime.
    DateTime,
}

fn email_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap_or_else(|error| {
            panic!("email regex failed to compile: {error}")
        })
    })
}

fn time_of_day_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap_or_else(|error| {
            panic!("time-of-day regex failed to compile: {error}")
        })
    })
}

impl Constraint {
    fn check(&self, label: &str, value: &Value) -> Option<String> {
        match self {
            Self::Text { min, max } => check_text(label, value, *min, *max),
            Self::Matches { regex, message } => match value.as_str() {
                Some(text) if regex.is_match(text) => None,
                Some(_) => Some((*message).to_owned()),
                None => Some(format!("{label} must be a string")),
            },
            Self::Number { max } => check_number(label, value, *max),
            Self::Integer { max, max_message } => {
                check_integer(label, value, *max, *max_message)
            }
            Self::OneOf(options) => match value.as_str() {
                Some(text) if options.contains(&text) => None,
                _ => Some(format!("{label} must be one of {}", options.join(", "))),
            },
            Self::Email => match value.as_str() {
                Some(text) if email_regex().is_match(text) => None,
                _ => Some("Invalid email".to_owned()),
            },
            Self::Uuid => match value.as_str() {
                Some(text) if Uuid::parse_str(text).is_ok() => None,
                _ => Some("Invalid uuid".to_owned()),
            },
            Self::TimeOfDay => match value.as_str() {
                Some(text) if time_of_day_regex().is_match(text) => None,
                _ => Some(format!("{label} must be in HH:MM format")),
            },
            Self::DateTime => match value.as_str() {
                Some(text) if DateTime::parse_from_rfc3339(text).is_ok() => None,
                _ => Some("Invalid datetime format".to_owned()),
            },
        }
    }
}

fn check_text(
    label: &str,
    value: &Value,
    min: Option<usize>,
    max: Option<usize>,
) -> Option<String> {
    let Some(text) = value.as_str() else {
        return Some(format!("{label} must be a string"));
    };
    let length = text.chars().count();
    if let Some(min) = min {
        if length < min {
            return Some(format!(
                "{label} must be at least {min} characters long"
            ));
        }
    }
    if let Some(max) = max {
        if length > max {
            return Some(format!("{label} must be at most {max} characters long"));
        }
    }
    None
}

fn check_number(label: &str, value: &Value, max: f64) -> Option<String> {
    let Some(number) = value.as_f64() else {
        return Some(format!("{label} must be a number"));
    };
    if number <= 0.0 {
        return Some(format!("{label} must be positive"));
    }
    if number > max {
        return Some(format!("{label} must be at most {max}"));
    }
    None
}

fn check_integer(
    label: &str,
    value: &Value,
    max: i64,
    max_message: Option<&'static str>,
) -> Option<String> {
    let Some(number) = value.as_i64() else {
        return Some(format!("{label} must be an integer"));
    };
    if number <= 0 {
        return Some(format!("{label} must be positive"));
    }
    if number > max {
        return Some(
            max_message.map_or_else(|| format!("{label} must be at most {max}"), str::to_owned),
        );
    }
    None
}

/// One named field in a schema.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    label: &'static str,
    required: bool,
    constraint: Constraint,
}

impl Field {
    pub fn required(name: &'static str, label: &'static str, constraint: Constraint) -> Self {
        Self {
            name,
            label,
            required: true,
            constraint,
        }
    }

    pub fn optional(name: &'static str, label: &'static str, constraint: Constraint) -> Self {
        Self {
            name,
            label,
            required: false,
            constraint,
        }
    }
}

/// Ordered field list validated against a JSON object payload.
///
/// Unknown keys in the payload are ignored, matching the strip semantics the
/// typed payload structs apply on deserialization.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Derive the partial-update schema: drop the named identity fields and
    /// mark every remaining field optional.
    pub fn for_update(&self, immutable: &[&str]) -> Self {
        let fields = self
            .fields
            .iter()
            .filter(|field| !immutable.contains(&field.name))
            .map(|field| Field {
                required: false,
                ..field.clone()
            })
            .collect();
        Self { fields }
    }

    /// Extend a derived schema with a field that only exists for updates.
    pub fn with_optional_field(mut self, field: Field) -> Self {
        self.fields.push(Field {
            required: false,
            ..field
        });
        self
    }

    /// Validate a payload, collecting every violation.
    pub fn validate(&self, payload: &Value) -> Result<(), Vec<FieldViolation>> {
        let Some(object) = payload.as_object() else {
            return Err(vec![FieldViolation::new(
                "body",
                "Request body must be a JSON object",
            )]);
        };

        let mut violations = Vec::new();
        for field in &self.fields {
            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        violations.push(FieldViolation::new(
                            field.name,
                            format!("{} is required", field.label),
                        ));
                    }
                }
                Some(value) => {
                    if let Some(message) = field.constraint.check(field.label, value) {
                        violations.push(FieldViolation::new(field.name, message));
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Validate and convert failures straight into the uniform 400 error.
    pub fn check(&self, payload: &Value) -> Result<(), Error> {
        self.validate(payload).map_err(invalid_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn sample_schema() -> Schema {
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
    }

    #[test]
    fn accepts_a_valid_payload() {
        let payload = json!({
            "service_name": "Haircut",
            "price": 35.0,
            "time_taken": 30,
            "barbershop_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        });
        sample_schema().validate(&payload).expect("valid payload");
    }

    #[test]
    fn reports_every_failing_field_at_once() {
        let payload = json!({
            "service_name": "ab",
            "price": -1,
            "time_taken": 481,
        });
        let violations = sample_schema()
            .validate(&payload)
            .expect_err("invalid payload");

        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["service_name", "price", "time_taken", "barbershop_id"]
        );
    }

    #[rstest]
    #[case(json!({"price": 0}), "Price must be positive")]
    #[case(json!({"price": 10000}), "Price must be at most 9999.99")]
    #[case(json!({"price": "cheap"}), "Price must be a number")]
    fn number_constraint_messages(#[case] payload: Value, #[case] expected: &str) {
        let violations = sample_schema().validate(&payload).expect_err("invalid");
        let message = violations
            .iter()
            .find(|v| v.field == "price")
            .map(|v| v.message.as_str())
            .expect("price violation");
        assert_eq!(message, expected);
    }

    #[test]
    fn integer_constraint_uses_custom_max_message() {
        let payload = json!({
            "service_name": "Haircut",
            "price": 35.0,
            "time_taken": 481,
            "barbershop_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        });
        let violations = sample_schema().validate(&payload).expect_err("invalid");
        assert_eq!(
            violations,
            vec![FieldViolation::new(
                "time_taken",
                "Time taken must be at most 480 minutes (8 hours)"
            )]
        );
    }

    #[test]
    fn update_schema_drops_identity_fields_and_relaxes_the_rest() {
        let update = sample_schema().for_update(&["barbershop_id"]);

        // Empty payloads are legal partial updates.
        update.validate(&json!({})).expect("empty update accepted");

        // Dropped fields are ignored even when present.
        update
            .validate(&json!({ "barbershop_id": "not-a-uuid" }))
            .expect("identity field stripped");

        // Provided fields are still constrained.
        let violations = update
            .validate(&json!({ "price": -2 }))
            .expect_err("constraint still applies");
        assert_eq!(violations.len(), 1);
    }

    #[rstest]
    #[case("09:00", true)]
    #[case("23:59", true)]
    #[case("9:30", true)]
    #[case("24:00", false)]
    #[case("12:60", false)]
    #[case("noon", false)]
    fn time_of_day_constraint(#[case] input: &str, #[case] valid: bool) {
        let schema = Schema::new(vec![Field::required(
            "starting_time",
            "Starting time",
            Constraint::TimeOfDay,
        )]);
        let result = schema.validate(&json!({ "starting_time": input }));
        assert_eq!(result.is_ok(), valid, "input: {input}");
    }

    #[test]
    fn non_object_payload_is_a_single_violation() {
        let violations = sample_schema()
            .validate(&json!([1, 2, 3]))
            .expect_err("array payload");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.first().map(|v| v.field.as_str()), Some("body"));
    }

    #[test]
    fn invalid_fields_error_carries_the_pair_list() {
        let error = invalid_fields(vec![FieldViolation::new("email", "Invalid email")]);
        assert_eq!(error.message(), "Invalid fields");
        let details = error.details().expect("details");
        assert_eq!(
            details,
            &json!([{ "field": "email", "message": "Invalid email" }])
        );
    }
}
