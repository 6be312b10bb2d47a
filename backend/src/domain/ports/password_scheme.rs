//! Port for password digesting.
//!
//! The concrete digest algorithm is a deployment concern; the domain only
//! needs to produce a digest at signup and verify one at login.

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by password scheme adapters.
    pub enum PasswordSchemeError {
        /// The stored digest could not be interpreted.
        MalformedDigest { message: String } =>
            "stored password digest is malformed: {message}",
    }
}

/// Port for producing and verifying password digests.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordScheme: Send + Sync {
    /// Produce a digest for a new password.
    fn digest(&self, password: &str) -> String;

    /// Check a password against a stored digest.
    fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordSchemeError>;
}

/// Fixture scheme for tests: the digest is the password itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordScheme;

impl PasswordScheme for FixturePasswordScheme {
    fn digest(&self, password: &str) -> String {
        password.to_owned()
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordSchemeError> {
        Ok(password == digest)
    }
}
