//! Classification of Diesel errors before port-level mapping.
//!
//! Repositories care about three things: did a unique constraint fire, did a
//! foreign key hold the row in place, or did something else go wrong. The
//! classifier extracts that once; each repository then maps the class onto
//! its own port error.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Broad classes of database failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbFailure {
    /// A unique constraint was violated; carries the constraint name when
    /// the driver reports one.
    Unique(String),
    /// A foreign key constraint was violated.
    ForeignKey(String),
    /// Connection-level failure.
    Connection(String),
    /// Anything else.
    Other(String),
}

/// Classify a Diesel error. Driver messages are logged at debug level and
/// replaced with generic text so they never reach clients.
pub fn classify(error: DieselError) -> DbFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DbFailure::Unique(info.constraint_name().unwrap_or("unknown").to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DbFailure::ForeignKey(info.constraint_name().unwrap_or("unknown").to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DbFailure::Connection("database connection error".to_owned())
        }
        DieselError::NotFound => DbFailure::Other("record not found".to_owned()),
        _ => DbFailure::Other("database error".to_owned()),
    }
}

/// Render a pool failure as a connection message for port errors.
pub fn pool_failure(error: PoolError) -> String {
    error.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classifies_as_other() {
        assert_eq!(
            classify(DieselError::NotFound),
            DbFailure::Other("record not found".to_owned())
        );
    }
}
