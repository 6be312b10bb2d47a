//! User identity data model.
//!
//! A user is both a principal (barbershop owner) and a potential employee
//! binding target. The password digest never leaves the domain: `User`
//! serializes without it, and the digest travels separately where the
//! credential flow needs it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::UserId;

/// Registered user account.
///
/// ## Invariants
/// - `email` is unique system-wide (enforced by the user store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored user together with its password digest, used only by the
/// credential flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user: User,
    pub password_digest: String,
}

/// Validated signup payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Validated login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Insert-shape record for the user store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_digest: String,
}

pub(crate) mod schemas {
    use std::sync::LazyLock;

    use crate::domain::validation::{Constraint, Field, Schema};

    /// Signup payload schema.
    pub static SIGNUP: LazyLock<Schema> = LazyLock::new(|| {
        Schema::new(vec![
            Field::required(
                "name",
                "Name",
                Constraint::Text {
                    min: Some(3),
                    max: None,
                },
            ),
            Field::required("email", "Email", Constraint::Email),
            Field::required(
                "password",
                "Password",
                Constraint::Text {
                    min: Some(8),
                    max: None,
                },
            ),
        ])
    });

    /// Login payload schema.
    pub static LOGIN: LazyLock<Schema> = LazyLock::new(|| {
        Schema::new(vec![
            Field::required("email", "Email", Constraint::Email),
            Field::required(
                "password",
                "Password",
                Constraint::Text {
                    min: Some(8),
                    max: None,
                },
            ),
        ])
    });
}
