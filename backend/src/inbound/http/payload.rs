//! Body and path extraction glue.

use actix_web::web;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::Error;
use crate::domain::validation::{FieldViolation, invalid_fields};

/// Deserialize a schema-validated payload into its typed shape.
///
/// The schema has already accepted the value, so a failure here is a bug in
/// the schema/struct pairing, not caller input.
pub fn from_validated<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|error| {
        Error::internal(format!("validated payload failed to deserialize: {error}"))
    })
}

/// JSON extractor configuration: malformed bodies get the uniform 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|error, _req| {
        tracing::debug!(%error, "rejecting malformed JSON body");
        Error::invalid_request("Invalid JSON body").into()
    })
}

/// Path extractor configuration: non-UUID ids get the uniform 400.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|error, _req| {
        tracing::debug!(%error, "rejecting malformed path parameter");
        invalid_fields(vec![FieldViolation::new("id", "Invalid uuid")]).into()
    })
}
