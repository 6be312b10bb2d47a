//! PostgreSQL-backed appointment store using Diesel.
//!
//! Appointments reach their owner through the assigned employee:
//! `appointments → employees → barbershops → owner`. Reads join the chain;
//! conditional mutations filter `employee_id` against the caller's employees
//! with a nested sub-select.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::appointment::{
    self, Appointment, AppointmentPatch, NewAppointmentRecord,
};
use crate::domain::id::{AppointmentId, UserId};
use crate::domain::ports::{AppointmentRepository, AppointmentRepositoryError};
use crate::domain::scope::ScopedRepository;

use super::db_errors::{DbFailure, classify, pool_failure};
use super::models::{AppointmentChangeset, AppointmentRow, NewAppointmentRow};
use super::pool::DbPool;
use super::schema::{appointments, barbershops, employees};

/// Diesel-backed implementation of the appointment ports.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
}

impl DieselAppointmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, AsyncPgConnection>,
        AppointmentRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| AppointmentRepositoryError::connection(pool_failure(err)))
    }
}

fn map_failure(failure: DbFailure) -> AppointmentRepositoryError {
    match failure {
        DbFailure::Connection(message) => AppointmentRepositoryError::connection(message),
        DbFailure::Unique(constraint) => {
            AppointmentRepositoryError::query(format!("unexpected unique violation: {constraint}"))
        }
        DbFailure::ForeignKey(constraint) => AppointmentRepositoryError::query(format!(
            "unexpected foreign key violation: {constraint}"
        )),
        DbFailure::Other(message) => AppointmentRepositoryError::query(message),
    }
}

fn into_appointment(row: AppointmentRow) -> Result<Appointment, AppointmentRepositoryError> {
    row.into_domain().map_err(AppointmentRepositoryError::query)
}

fn changeset(patch: &AppointmentPatch) -> AppointmentChangeset<'_> {
    AppointmentChangeset {
        client_name: patch.client_name.as_deref(),
        client_contact: patch.client_contact.as_deref(),
        datetime: patch.datetime,
        status: patch.status.map(|status| status.as_str()),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn insert(
        &self,
        record: NewAppointmentRecord,
    ) -> Result<Appointment, AppointmentRepositoryError> {
        let mut conn = self.conn().await?;

        let row = NewAppointmentRow {
            id: Uuid::new_v4(),
            employee_id: record.employee_id.as_uuid(),
            service_id: record.service_id.as_uuid(),
            client_name: &record.client_name,
            client_contact: &record.client_contact,
            datetime: record.datetime,
            status: record.status.as_str(),
        };

        let inserted: AppointmentRow = diesel::insert_into(appointments::table)
            .values(&row)
            .returning(AppointmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        into_appointment(inserted)
    }
}

#[async_trait]
impl ScopedRepository for DieselAppointmentRepository {
    const RESOURCE: &'static str = appointment::RESOURCE;

    type Id = AppointmentId;
    type Entity = Appointment;
    type Patch = AppointmentPatch;
    type Error = AppointmentRepositoryError;

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.conn().await?;

        let row: Option<AppointmentRow> = appointments::table
            .inner_join(employees::table.inner_join(barbershops::table))
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .filter(appointments::id.eq(id.as_uuid()))
            .select(AppointmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(classify(err)))?;

        row.map(into_appointment).transpose()
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.conn().await?;

        let rows: Vec<AppointmentRow> = appointments::table
            .inner_join(employees::table.inner_join(barbershops::table))
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .order(appointments::datetime.asc())
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        rows.into_iter().map(into_appointment).collect()
    }

    async fn update_unscoped(
        &self,
        id: AppointmentId,
        patch: AppointmentPatch,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.conn().await?;

        let row: Option<AppointmentRow> =
            diesel::update(appointments::table.filter(appointments::id.eq(id.as_uuid())))
                .set(&changeset(&patch))
                .returning(AppointmentRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_failure(classify(err)))?;

        row.map(into_appointment).transpose()
    }

    async fn update_for_owner(
        &self,
        owner: UserId,
        id: AppointmentId,
        patch: AppointmentPatch,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.conn().await?;

        let owned_shops = barbershops::table
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .select(barbershops::id);
        let owned_employees = employees::table
            .filter(employees::barbershop_id.eq_any(owned_shops))
            .select(employees::id);

        let row: Option<AppointmentRow> = diesel::update(
            appointments::table
                .filter(appointments::id.eq(id.as_uuid()))
                .filter(appointments::employee_id.eq_any(owned_employees)),
        )
        .set(&changeset(&patch))
        .returning(AppointmentRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_failure(classify(err)))?;

        row.map(into_appointment).transpose()
    }

    async fn delete_unscoped(&self, id: AppointmentId) -> Result<bool, AppointmentRepositoryError> {
        let mut conn = self.conn().await?;

        let deleted = diesel::delete(appointments::table.filter(appointments::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(deleted > 0)
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.conn().await?;

        let owned_shops = barbershops::table
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .select(barbershops::id);
        let owned_employees = employees::table
            .filter(employees::barbershop_id.eq_any(owned_shops))
            .select(employees::id);

        let row: Option<AppointmentRow> = diesel::delete(
            appointments::table
                .filter(appointments::id.eq(id.as_uuid()))
                .filter(appointments::employee_id.eq_any(owned_employees)),
        )
        .returning(AppointmentRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_failure(classify(err)))?;

        row.map(into_appointment).transpose()
    }
}
