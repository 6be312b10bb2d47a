//! PostgreSQL-backed schedule store using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::id::{EmployeeId, ScheduleId, UserId};
use crate::domain::ports::{ScheduleRepository, ScheduleRepositoryError};
use crate::domain::schedule::Schedule;

use super::db_errors::{DbFailure, classify, pool_failure};
use super::models::{NewScheduleRow, ScheduleRow};
use super::pool::DbPool;
use super::schema::{barbershops, employees, schedules};

/// Diesel-backed implementation of the `ScheduleRepository` port.
#[derive(Clone)]
pub struct DieselScheduleRepository {
    pool: DbPool,
}

impl DieselScheduleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: DbFailure) -> ScheduleRepositoryError {
    match failure {
        DbFailure::Connection(message) => ScheduleRepositoryError::connection(message),
        DbFailure::Unique(constraint) => {
            ScheduleRepositoryError::query(format!("unexpected unique violation: {constraint}"))
        }
        DbFailure::ForeignKey(constraint) => ScheduleRepositoryError::query(format!(
            "unexpected foreign key violation: {constraint}"
        )),
        DbFailure::Other(message) => ScheduleRepositoryError::query(message),
    }
}

#[async_trait]
impl ScheduleRepository for DieselScheduleRepository {
    async fn insert(&self, employee_id: EmployeeId) -> Result<Schedule, ScheduleRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| ScheduleRepositoryError::connection(pool_failure(err)))?;

        let row = NewScheduleRow {
            id: Uuid::new_v4(),
            employee_id: employee_id.as_uuid(),
        };

        let inserted: ScheduleRow = diesel::insert_into(schedules::table)
            .values(&row)
            .returning(ScheduleRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(inserted.into_domain())
    }

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: ScheduleId,
    ) -> Result<Option<Schedule>, ScheduleRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| ScheduleRepositoryError::connection(pool_failure(err)))?;

        let row: Option<ScheduleRow> = schedules::table
            .inner_join(employees::table.inner_join(barbershops::table))
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .filter(schedules::id.eq(id.as_uuid()))
            .select(ScheduleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(ScheduleRow::into_domain))
    }
}
