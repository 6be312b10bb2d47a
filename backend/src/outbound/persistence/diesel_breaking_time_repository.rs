//! PostgreSQL-backed breaking time store using Diesel.
//!
//! The ownership chain is the longest in the system:
//! `breaking_times → schedules → employees → barbershops → owner`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::breaking_time::{
    self, BreakingTime, BreakingTimePatch, NewBreakingTime, TimeOfDay,
};
use crate::domain::id::{BreakingTimeId, UserId};
use crate::domain::ports::{BreakingTimeRepository, BreakingTimeRepositoryError};
use crate::domain::scope::ScopedRepository;

use super::db_errors::{DbFailure, classify, pool_failure};
use super::models::{BreakingTimeChangeset, BreakingTimeRow, NewBreakingTimeRow};
use super::pool::DbPool;
use super::schema::{barbershops, breaking_times, employees, schedules};

/// Diesel-backed implementation of the breaking time ports.
#[derive(Clone)]
pub struct DieselBreakingTimeRepository {
    pool: DbPool,
}

impl DieselBreakingTimeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, AsyncPgConnection>,
        BreakingTimeRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| BreakingTimeRepositoryError::connection(pool_failure(err)))
    }
}

fn map_failure(failure: DbFailure) -> BreakingTimeRepositoryError {
    match failure {
        DbFailure::Connection(message) => BreakingTimeRepositoryError::connection(message),
        DbFailure::Unique(constraint) => {
            BreakingTimeRepositoryError::query(format!("unexpected unique violation: {constraint}"))
        }
        DbFailure::ForeignKey(constraint) => BreakingTimeRepositoryError::query(format!(
            "unexpected foreign key violation: {constraint}"
        )),
        DbFailure::Other(message) => BreakingTimeRepositoryError::query(message),
    }
}

fn changeset(patch: &BreakingTimePatch) -> BreakingTimeChangeset {
    BreakingTimeChangeset {
        starting_time: patch.starting_time.map(TimeOfDay::to_reference_datetime),
        ending_time: patch.ending_time.map(TimeOfDay::to_reference_datetime),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl BreakingTimeRepository for DieselBreakingTimeRepository {
    async fn insert(
        &self,
        breaking_time: NewBreakingTime,
    ) -> Result<BreakingTime, BreakingTimeRepositoryError> {
        let mut conn = self.conn().await?;

        let row = NewBreakingTimeRow {
            id: Uuid::new_v4(),
            schedule_id: breaking_time.schedule_id.as_uuid(),
            starting_time: breaking_time.starting_time.to_reference_datetime(),
            ending_time: breaking_time.ending_time.to_reference_datetime(),
        };

        let inserted: BreakingTimeRow = diesel::insert_into(breaking_times::table)
            .values(&row)
            .returning(BreakingTimeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(inserted.into_domain())
    }
}

#[async_trait]
impl ScopedRepository for DieselBreakingTimeRepository {
    const RESOURCE: &'static str = breaking_time::RESOURCE;

    type Id = BreakingTimeId;
    type Entity = BreakingTime;
    type Patch = BreakingTimePatch;
    type Error = BreakingTimeRepositoryError;

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: BreakingTimeId,
    ) -> Result<Option<BreakingTime>, BreakingTimeRepositoryError> {
        let mut conn = self.conn().await?;

        let row: Option<BreakingTimeRow> = breaking_times::table
            .inner_join(
                schedules::table.inner_join(employees::table.inner_join(barbershops::table)),
            )
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .filter(breaking_times::id.eq(id.as_uuid()))
            .select(BreakingTimeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(BreakingTimeRow::into_domain))
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<BreakingTime>, BreakingTimeRepositoryError> {
        let mut conn = self.conn().await?;

        let rows: Vec<BreakingTimeRow> = breaking_times::table
            .inner_join(
                schedules::table.inner_join(employees::table.inner_join(barbershops::table)),
            )
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .order(breaking_times::starting_time.asc())
            .select(BreakingTimeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(rows.into_iter().map(BreakingTimeRow::into_domain).collect())
    }

    async fn update_unscoped(
        &self,
        id: BreakingTimeId,
        patch: BreakingTimePatch,
    ) -> Result<Option<BreakingTime>, BreakingTimeRepositoryError> {
        let mut conn = self.conn().await?;

        let row: Option<BreakingTimeRow> =
            diesel::update(breaking_times::table.filter(breaking_times::id.eq(id.as_uuid())))
                .set(&changeset(&patch))
                .returning(BreakingTimeRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(BreakingTimeRow::into_domain))
    }

    async fn update_for_owner(
        &self,
        owner: UserId,
        id: BreakingTimeId,
        patch: BreakingTimePatch,
    ) -> Result<Option<BreakingTime>, BreakingTimeRepositoryError> {
        let mut conn = self.conn().await?;

        let owned_shops = barbershops::table
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .select(barbershops::id);
        let owned_employees = employees::table
            .filter(employees::barbershop_id.eq_any(owned_shops))
            .select(employees::id);
        let owned_schedules = schedules::table
            .filter(schedules::employee_id.eq_any(owned_employees))
            .select(schedules::id);

        let row: Option<BreakingTimeRow> = diesel::update(
            breaking_times::table
                .filter(breaking_times::id.eq(id.as_uuid()))
                .filter(breaking_times::schedule_id.eq_any(owned_schedules)),
        )
        .set(&changeset(&patch))
        .returning(BreakingTimeRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(BreakingTimeRow::into_domain))
    }

    async fn delete_unscoped(
        &self,
        id: BreakingTimeId,
    ) -> Result<bool, BreakingTimeRepositoryError> {
        let mut conn = self.conn().await?;

        let deleted =
            diesel::delete(breaking_times::table.filter(breaking_times::id.eq(id.as_uuid())))
                .execute(&mut conn)
                .await
                .map_err(|err| map_failure(classify(err)))?;

        Ok(deleted > 0)
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: BreakingTimeId,
    ) -> Result<Option<BreakingTime>, BreakingTimeRepositoryError> {
        let mut conn = self.conn().await?;

        let owned_shops = barbershops::table
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .select(barbershops::id);
        let owned_employees = employees::table
            .filter(employees::barbershop_id.eq_any(owned_shops))
            .select(employees::id);
        let owned_schedules = schedules::table
            .filter(schedules::employee_id.eq_any(owned_employees))
            .select(schedules::id);

        let row: Option<BreakingTimeRow> = diesel::delete(
            breaking_times::table
                .filter(breaking_times::id.eq(id.as_uuid()))
                .filter(breaking_times::schedule_id.eq_any(owned_schedules)),
        )
        .returning(BreakingTimeRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(BreakingTimeRow::into_domain))
    }
}
