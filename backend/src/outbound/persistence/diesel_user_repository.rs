//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::id::UserId;
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{NewUser, User, UserCredentials};

use super::db_errors::{DbFailure, classify, pool_failure};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: DbFailure) -> UserRepositoryError {
    match failure {
        DbFailure::Unique(_) => UserRepositoryError::duplicate_email(),
        DbFailure::Connection(message) => UserRepositoryError::connection(message),
        DbFailure::ForeignKey(constraint) => {
            UserRepositoryError::query(format!("unexpected foreign key violation: {constraint}"))
        }
        DbFailure::Other(message) => UserRepositoryError::query(message),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserRepositoryError::connection(pool_failure(err)))?;

        let row = NewUserRow {
            id: Uuid::new_v4(),
            name: &user.name,
            email: &user.email,
            password_digest: &user.password_digest,
        };

        let inserted: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(inserted.into_user())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserRepositoryError::connection(pool_failure(err)))?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(UserRow::into_credentials))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserRepositoryError::connection(pool_failure(err)))?;

        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(UserRow::into_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violations_map_to_duplicate_email() {
        let error = map_failure(DbFailure::Unique("users_email_key".to_owned()));
        assert_eq!(error, UserRepositoryError::duplicate_email());
    }

    #[rstest]
    fn connection_failures_keep_their_class() {
        let error = map_failure(DbFailure::Connection("refused".to_owned()));
        assert!(matches!(error, UserRepositoryError::Connection { .. }));
    }
}
