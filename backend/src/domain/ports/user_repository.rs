//! Port for user account storage.

use async_trait::async_trait;

use crate::domain::id::UserId;
use crate::domain::user::{NewUser, User, UserCredentials};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// The unique email constraint was violated.
        DuplicateEmail => "email already registered",
    }
}

/// Port for user account storage and lookup.
///
/// Lookups by email return the stored credentials so the login flow can
/// verify the password digest without a second round trip.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with
    /// [`UserRepositoryError::DuplicateEmail`] when the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Fetch an account with its password digest by unique email.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserRepositoryError>;

    /// Fetch an account by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise user storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let now = chrono::Utc::now();
        Ok(User {
            id: UserId::random(),
            name: user.name,
            email: user.email,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_email(
        &self,
        _email: &str,
    ) -> Result<Option<UserCredentials>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }
}
