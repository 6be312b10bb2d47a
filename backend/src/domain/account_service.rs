//! Account domain service: signup, login, and principal lookup.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::error::Error;
use crate::domain::id::UserId;
use crate::domain::ports::{
    AccountOps, PasswordScheme, PasswordSchemeError, UserRepository, UserRepositoryError,
};
use crate::domain::user::{LoginRequest, NewUser, SignupRequest, User};

/// Account service implementing [`AccountOps`].
#[derive(Clone)]
pub struct AccountService<U, P> {
    users: Arc<U>,
    passwords: Arc<P>,
}

impl<U, P> AccountService<U, P> {
    /// Create a new service with the given collaborators.
    pub fn new(users: Arc<U>, passwords: Arc<P>) -> Self {
        Self { users, passwords }
    }
}

fn duplicate_email_error() -> Error {
    Error::conflict("Email already exists").with_details(json!({ "email": "Email already in use" }))
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::DuplicateEmail => duplicate_email_error(),
        UserRepositoryError::Connection { message } | UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_password_error(error: PasswordSchemeError) -> Error {
    Error::internal(format!("password scheme error: {error}"))
}

#[async_trait]
impl<U, P> AccountOps for AccountService<U, P>
where
    U: UserRepository,
    P: PasswordScheme,
{
    async fn signup(&self, request: SignupRequest) -> Result<User, Error> {
        if self
            .users
            .find_by_email(&request.email)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(duplicate_email_error());
        }

        let password_digest = self.passwords.digest(&request.password);
        // The unique index backstops the pre-check if a concurrent signup
        // slips between the two steps.
        self.users
            .insert(NewUser {
                name: request.name,
                email: request.email,
                password_digest,
            })
            .await
            .map_err(map_user_error)
    }

    async fn login(&self, request: LoginRequest) -> Result<User, Error> {
        let Some(credentials) = self
            .users
            .find_by_email(&request.email)
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::not_found("User not found")
                .with_details(json!({ "email": "User not found" })));
        };

        let matches = self
            .passwords
            .verify(&request.password, &credentials.password_digest)
            .map_err(map_password_error)?;
        if !matches {
            return Err(Error::unauthorized("Invalid password")
                .with_details(json!({ "password": "Invalid password" })));
        }

        Ok(credentials.user)
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                Error::not_found("User not found").with_details(json!({ "id": "User not found" }))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPasswordScheme, MockUserRepository};
    use crate::domain::user::UserCredentials;
    use chrono::Utc;

    fn stored_user(email: &str) -> UserCredentials {
        let now = Utc::now();
        UserCredentials {
            user: User {
                id: UserId::random(),
                name: "Ada".to_owned(),
                email: email.to_owned(),
                created_at: now,
                updated_at: now,
            },
            password_digest: "digest".to_owned(),
        }
    }

    fn signup_request() -> SignupRequest {
        SignupRequest {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "s3cret-pw".to_owned(),
        }
    }

    #[tokio::test]
    async fn signup_rejects_a_taken_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(Some(stored_user("ada@example.com"))));
        users.expect_insert().times(0);

        let service = AccountService::new(Arc::new(users), Arc::new(MockPasswordScheme::new()));
        let error = service.signup(signup_request()).await.expect_err("conflict");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "Email already exists");
    }

    #[tokio::test]
    async fn signup_digests_the_password_before_storing() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        users
            .expect_insert()
            .withf(|new_user: &NewUser| new_user.password_digest == "digest-of-pw")
            .times(1)
            .return_once(|new_user| {
                let now = Utc::now();
                Ok(User {
                    id: UserId::random(),
                    name: new_user.name,
                    email: new_user.email,
                    created_at: now,
                    updated_at: now,
                })
            });

        let mut passwords = MockPasswordScheme::new();
        passwords
            .expect_digest()
            .times(1)
            .return_once(|_| "digest-of-pw".to_owned());

        let service = AccountService::new(Arc::new(users), Arc::new(passwords));
        let user = service.signup(signup_request()).await.expect("signup");
        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn login_hides_nothing_about_wrong_passwords() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(Some(stored_user("ada@example.com"))));

        let mut passwords = MockPasswordScheme::new();
        passwords.expect_verify().times(1).return_once(|_, _| Ok(false));

        let service = AccountService::new(Arc::new(users), Arc::new(passwords));
        let error = service
            .login(LoginRequest {
                email: "ada@example.com".to_owned(),
                password: "wrong-password".to_owned(),
            })
            .await
            .expect_err("unauthorized");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), "Invalid password");
    }

    #[tokio::test]
    async fn login_reports_unknown_emails_as_not_found() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));

        let service = AccountService::new(Arc::new(users), Arc::new(MockPasswordScheme::new()));
        let error = service
            .login(LoginRequest {
                email: "ghost@example.com".to_owned(),
                password: "s3cret-pw".to_owned(),
            })
            .await
            .expect_err("not found");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
