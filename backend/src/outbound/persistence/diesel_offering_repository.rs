//! PostgreSQL-backed service offering store using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::id::{BarbershopId, ServiceOfferingId, UserId};
use crate::domain::offering::{self, NewServiceOffering, ServiceOffering, ServiceOfferingPatch};
use crate::domain::ports::{OfferingRepositoryError, ServiceOfferingRepository};
use crate::domain::scope::ScopedRepository;

use super::db_errors::{DbFailure, classify, pool_failure};
use super::models::{NewServiceRow, ServiceChangeset, ServiceRow};
use super::pool::DbPool;
use super::schema::{barbershops, services};

/// Diesel-backed implementation of the service offering ports.
#[derive(Clone)]
pub struct DieselOfferingRepository {
    pool: DbPool,
}

impl DieselOfferingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, AsyncPgConnection>,
        OfferingRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| OfferingRepositoryError::connection(pool_failure(err)))
    }
}

fn map_failure(failure: DbFailure) -> OfferingRepositoryError {
    match failure {
        // Appointments hold their service with RESTRICT.
        DbFailure::ForeignKey(_) => OfferingRepositoryError::has_dependents(),
        DbFailure::Connection(message) => OfferingRepositoryError::connection(message),
        DbFailure::Unique(constraint) => {
            OfferingRepositoryError::query(format!("unexpected unique violation: {constraint}"))
        }
        DbFailure::Other(message) => OfferingRepositoryError::query(message),
    }
}

fn changeset(patch: &ServiceOfferingPatch) -> ServiceChangeset<'_> {
    ServiceChangeset {
        service_name: patch.service_name.as_deref(),
        price: patch.price,
        time_taken: patch.time_taken,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl ServiceOfferingRepository for DieselOfferingRepository {
    async fn insert(
        &self,
        offering: NewServiceOffering,
    ) -> Result<ServiceOffering, OfferingRepositoryError> {
        let mut conn = self.conn().await?;

        let row = NewServiceRow {
            id: Uuid::new_v4(),
            barbershop_id: offering.barbershop_id.as_uuid(),
            service_name: &offering.service_name,
            price: offering.price,
            time_taken: offering.time_taken,
        };

        let inserted: ServiceRow = diesel::insert_into(services::table)
            .values(&row)
            .returning(ServiceRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(inserted.into_domain())
    }

    async fn find_in_barbershop(
        &self,
        barbershop_id: BarbershopId,
        id: ServiceOfferingId,
    ) -> Result<Option<ServiceOffering>, OfferingRepositoryError> {
        let mut conn = self.conn().await?;

        let row: Option<ServiceRow> = services::table
            .filter(services::id.eq(id.as_uuid()))
            .filter(services::barbershop_id.eq(barbershop_id.as_uuid()))
            .select(ServiceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(ServiceRow::into_domain))
    }

    async fn count_for_barbershop(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<u64, OfferingRepositoryError> {
        let mut conn = self.conn().await?;

        let count: i64 = services::table
            .filter(services::barbershop_id.eq(barbershop_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(count.unsigned_abs())
    }
}

#[async_trait]
impl ScopedRepository for DieselOfferingRepository {
    const RESOURCE: &'static str = offering::RESOURCE;

    type Id = ServiceOfferingId;
    type Entity = ServiceOffering;
    type Patch = ServiceOfferingPatch;
    type Error = OfferingRepositoryError;

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: ServiceOfferingId,
    ) -> Result<Option<ServiceOffering>, OfferingRepositoryError> {
        let mut conn = self.conn().await?;

        let row: Option<ServiceRow> = services::table
            .inner_join(barbershops::table)
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .filter(services::id.eq(id.as_uuid()))
            .select(ServiceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(ServiceRow::into_domain))
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<ServiceOffering>, OfferingRepositoryError> {
        let mut conn = self.conn().await?;

        let rows: Vec<ServiceRow> = services::table
            .inner_join(barbershops::table)
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .order(services::created_at.asc())
            .select(ServiceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(rows.into_iter().map(ServiceRow::into_domain).collect())
    }

    async fn update_unscoped(
        &self,
        id: ServiceOfferingId,
        patch: ServiceOfferingPatch,
    ) -> Result<Option<ServiceOffering>, OfferingRepositoryError> {
        let mut conn = self.conn().await?;

        let row: Option<ServiceRow> =
            diesel::update(services::table.filter(services::id.eq(id.as_uuid())))
                .set(&changeset(&patch))
                .returning(ServiceRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(ServiceRow::into_domain))
    }

    async fn update_for_owner(
        &self,
        owner: UserId,
        id: ServiceOfferingId,
        patch: ServiceOfferingPatch,
    ) -> Result<Option<ServiceOffering>, OfferingRepositoryError> {
        let mut conn = self.conn().await?;

        let owned_shops = barbershops::table
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .select(barbershops::id);

        let row: Option<ServiceRow> = diesel::update(
            services::table
                .filter(services::id.eq(id.as_uuid()))
                .filter(services::barbershop_id.eq_any(owned_shops)),
        )
        .set(&changeset(&patch))
        .returning(ServiceRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(ServiceRow::into_domain))
    }

    async fn delete_unscoped(
        &self,
        id: ServiceOfferingId,
    ) -> Result<bool, OfferingRepositoryError> {
        let mut conn = self.conn().await?;

        let deleted = diesel::delete(services::table.filter(services::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(deleted > 0)
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: ServiceOfferingId,
    ) -> Result<Option<ServiceOffering>, OfferingRepositoryError> {
        let mut conn = self.conn().await?;

        let owned_shops = barbershops::table
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .select(barbershops::id);

        let row: Option<ServiceRow> = diesel::delete(
            services::table
                .filter(services::id.eq(id.as_uuid()))
                .filter(services::barbershop_id.eq_any(owned_shops)),
        )
        .returning(ServiceRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(ServiceRow::into_domain))
    }
}
