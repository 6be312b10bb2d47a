//! PostgreSQL-backed employee store using Diesel.
//!
//! Scoped queries join `employees → barbershops` and filter on the owner at
//! the join, so reachability is decided inside the database. The bound user
//! row travels with every read because the domain employee embeds it.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::employee::{self, Employee, EmployeePatch, NewEmployeeRecord};
use crate::domain::id::{BarbershopId, EmployeeId, UserId};
use crate::domain::ports::{EmployeeRepository, EmployeeRepositoryError};
use crate::domain::scope::ScopedRepository;

use super::db_errors::{DbFailure, classify, pool_failure};
use super::models::{EmployeeChangeset, EmployeeRow, NewEmployeeRow, UserRow};
use super::pool::DbPool;
use super::schema::{barbershops, employees, users};

/// Diesel-backed implementation of the employee ports.
#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
}

impl DieselEmployeeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, AsyncPgConnection>,
        EmployeeRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| EmployeeRepositoryError::connection(pool_failure(err)))
    }
}

fn map_failure(failure: DbFailure) -> EmployeeRepositoryError {
    match failure {
        // The only unique constraint is the system-wide user binding.
        DbFailure::Unique(_) => EmployeeRepositoryError::duplicate_user(),
        // Appointments hold their employee with RESTRICT.
        DbFailure::ForeignKey(_) => EmployeeRepositoryError::has_dependents(),
        DbFailure::Connection(message) => EmployeeRepositoryError::connection(message),
        DbFailure::Other(message) => EmployeeRepositoryError::query(message),
    }
}

fn into_employee(row: EmployeeRow, user: UserRow) -> Result<Employee, EmployeeRepositoryError> {
    row.into_domain(user).map_err(EmployeeRepositoryError::query)
}

fn changeset(patch: &EmployeePatch) -> EmployeeChangeset<'_> {
    EmployeeChangeset {
        role: patch.role.map(|role| role.as_str()),
        phone_number: patch.phone_number.as_deref(),
        updated_at: Utc::now(),
    }
}

async fn load_user_row(
    conn: &mut AsyncPgConnection,
    user_id: Uuid,
) -> Result<UserRow, EmployeeRepositoryError> {
    users::table
        .find(user_id)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .map_err(|err| map_failure(classify(err)))
}

#[async_trait]
impl EmployeeRepository for DieselEmployeeRepository {
    async fn insert(
        &self,
        record: NewEmployeeRecord,
    ) -> Result<Employee, EmployeeRepositoryError> {
        let mut conn = self.conn().await?;

        let row = NewEmployeeRow {
            id: Uuid::new_v4(),
            user_id: record.user_id.as_uuid(),
            barbershop_id: record.barbershop_id.as_uuid(),
            role: record.role.as_str(),
            phone_number: &record.phone_number,
        };

        let inserted: EmployeeRow = diesel::insert_into(employees::table)
            .values(&row)
            .returning(EmployeeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        let user = load_user_row(&mut conn, inserted.user_id).await?;
        into_employee(inserted, user)
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.conn().await?;

        let found: Option<(EmployeeRow, UserRow)> = employees::table
            .inner_join(users::table)
            .filter(employees::user_id.eq(user_id.as_uuid()))
            .select((EmployeeRow::as_select(), UserRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(classify(err)))?;

        found
            .map(|(row, user)| into_employee(row, user))
            .transpose()
    }

    async fn count_for_barbershop(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<u64, EmployeeRepositoryError> {
        let mut conn = self.conn().await?;

        let count: i64 = employees::table
            .filter(employees::barbershop_id.eq(barbershop_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(count.unsigned_abs())
    }
}

#[async_trait]
impl ScopedRepository for DieselEmployeeRepository {
    const RESOURCE: &'static str = employee::RESOURCE;

    type Id = EmployeeId;
    type Entity = Employee;
    type Patch = EmployeePatch;
    type Error = EmployeeRepositoryError;

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.conn().await?;

        let found: Option<(EmployeeRow, UserRow)> = employees::table
            .inner_join(users::table)
            .inner_join(barbershops::table)
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .filter(employees::id.eq(id.as_uuid()))
            .select((EmployeeRow::as_select(), UserRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(classify(err)))?;

        found
            .map(|(row, user)| into_employee(row, user))
            .transpose()
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        let mut conn = self.conn().await?;

        let rows: Vec<(EmployeeRow, UserRow)> = employees::table
            .inner_join(users::table)
            .inner_join(barbershops::table)
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .order(employees::created_at.asc())
            .select((EmployeeRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        rows.into_iter()
            .map(|(row, user)| into_employee(row, user))
            .collect()
    }

    async fn update_unscoped(
        &self,
        id: EmployeeId,
        patch: EmployeePatch,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.conn().await?;

        let row: Option<EmployeeRow> =
            diesel::update(employees::table.filter(employees::id.eq(id.as_uuid())))
                .set(&changeset(&patch))
                .returning(EmployeeRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_failure(classify(err)))?;

        match row {
            Some(row) => {
                let user = load_user_row(&mut conn, row.user_id).await?;
                into_employee(row, user).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn update_for_owner(
        &self,
        owner: UserId,
        id: EmployeeId,
        patch: EmployeePatch,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.conn().await?;

        let owned_shops = barbershops::table
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .select(barbershops::id);

        let row: Option<EmployeeRow> = diesel::update(
            employees::table
                .filter(employees::id.eq(id.as_uuid()))
                .filter(employees::barbershop_id.eq_any(owned_shops)),
        )
        .set(&changeset(&patch))
        .returning(EmployeeRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_failure(classify(err)))?;

        match row {
            Some(row) => {
                let user = load_user_row(&mut conn, row.user_id).await?;
                into_employee(row, user).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn delete_unscoped(&self, id: EmployeeId) -> Result<bool, EmployeeRepositoryError> {
        let mut conn = self.conn().await?;

        let deleted = diesel::delete(employees::table.filter(employees::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(deleted > 0)
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.conn().await?;

        let owned_shops = barbershops::table
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .select(barbershops::id);

        let row: Option<EmployeeRow> = diesel::delete(
            employees::table
                .filter(employees::id.eq(id.as_uuid()))
                .filter(employees::barbershop_id.eq_any(owned_shops)),
        )
        .returning(EmployeeRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_failure(classify(err)))?;

        match row {
            Some(row) => {
                let user = load_user_row(&mut conn, row.user_id).await?;
                into_employee(row, user).map(Some)
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violations_read_as_duplicate_binding() {
        let error = map_failure(DbFailure::Unique("employees_user_id_key".to_owned()));
        assert_eq!(error, EmployeeRepositoryError::duplicate_user());
    }

    #[rstest]
    fn foreign_key_violations_read_as_dependents() {
        let error = map_failure(DbFailure::ForeignKey(
            "appointments_employee_id_fkey".to_owned(),
        ));
        assert_eq!(error, EmployeeRepositoryError::has_dependents());
    }
}
