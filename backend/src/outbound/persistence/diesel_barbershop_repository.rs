//! PostgreSQL-backed barbershop store using Diesel.
//!
//! Barbershops sit directly under their owner, so every scoped query is a
//! plain two-column filter; no join is needed.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::barbershop::{self, Barbershop, BarbershopPatch, NewBarbershop};
use crate::domain::id::{BarbershopId, UserId};
use crate::domain::ports::{BarbershopRepository, BarbershopRepositoryError};
use crate::domain::scope::ScopedRepository;

use super::db_errors::{DbFailure, classify, pool_failure};
use super::models::{BarbershopChangeset, BarbershopRow, NewBarbershopRow};
use super::pool::DbPool;
use super::schema::barbershops;

/// Diesel-backed implementation of the barbershop ports.
#[derive(Clone)]
pub struct DieselBarbershopRepository {
    pool: DbPool,
}

impl DieselBarbershopRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, diesel_async::AsyncPgConnection>,
        BarbershopRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| BarbershopRepositoryError::connection(pool_failure(err)))
    }
}

fn map_failure(failure: DbFailure) -> BarbershopRepositoryError {
    match failure {
        // Employees and services reference the shop with RESTRICT, so a
        // foreign key violation on delete means live dependents.
        DbFailure::ForeignKey(_) => BarbershopRepositoryError::has_dependents(),
        DbFailure::Connection(message) => BarbershopRepositoryError::connection(message),
        DbFailure::Unique(constraint) => BarbershopRepositoryError::query(format!(
            "unexpected unique violation: {constraint}"
        )),
        DbFailure::Other(message) => BarbershopRepositoryError::query(message),
    }
}

fn changeset(patch: &BarbershopPatch) -> BarbershopChangeset<'_> {
    BarbershopChangeset {
        name: patch.name.as_deref(),
        address: patch.address.as_deref(),
        address_number: patch.address_number.as_deref(),
        neighbourhood: patch.neighbourhood.as_deref(),
        landmark: patch.landmark.as_deref(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl BarbershopRepository for DieselBarbershopRepository {
    async fn insert(
        &self,
        owner: UserId,
        shop: NewBarbershop,
    ) -> Result<Barbershop, BarbershopRepositoryError> {
        let mut conn = self.conn().await?;

        let row = NewBarbershopRow {
            id: Uuid::new_v4(),
            owner_id: owner.as_uuid(),
            name: &shop.name,
            address: &shop.address,
            address_number: &shop.address_number,
            neighbourhood: &shop.neighbourhood,
            landmark: shop.landmark.as_deref(),
        };

        let inserted: BarbershopRow = diesel::insert_into(barbershops::table)
            .values(&row)
            .returning(BarbershopRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(inserted.into_domain())
    }
}

#[async_trait]
impl ScopedRepository for DieselBarbershopRepository {
    const RESOURCE: &'static str = barbershop::RESOURCE;

    type Id = BarbershopId;
    type Entity = Barbershop;
    type Patch = BarbershopPatch;
    type Error = BarbershopRepositoryError;

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: BarbershopId,
    ) -> Result<Option<Barbershop>, BarbershopRepositoryError> {
        let mut conn = self.conn().await?;

        let row: Option<BarbershopRow> = barbershops::table
            .filter(barbershops::id.eq(id.as_uuid()))
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .select(BarbershopRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(BarbershopRow::into_domain))
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Barbershop>, BarbershopRepositoryError> {
        let mut conn = self.conn().await?;

        let rows: Vec<BarbershopRow> = barbershops::table
            .filter(barbershops::owner_id.eq(owner.as_uuid()))
            .order(barbershops::created_at.asc())
            .select(BarbershopRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(rows.into_iter().map(BarbershopRow::into_domain).collect())
    }

    async fn update_unscoped(
        &self,
        id: BarbershopId,
        patch: BarbershopPatch,
    ) -> Result<Option<Barbershop>, BarbershopRepositoryError> {
        let mut conn = self.conn().await?;

        let row: Option<BarbershopRow> =
            diesel::update(barbershops::table.filter(barbershops::id.eq(id.as_uuid())))
                .set(&changeset(&patch))
                .returning(BarbershopRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(BarbershopRow::into_domain))
    }

    async fn update_for_owner(
        &self,
        owner: UserId,
        id: BarbershopId,
        patch: BarbershopPatch,
    ) -> Result<Option<Barbershop>, BarbershopRepositoryError> {
        let mut conn = self.conn().await?;

        let row: Option<BarbershopRow> = diesel::update(
            barbershops::table
                .filter(barbershops::id.eq(id.as_uuid()))
                .filter(barbershops::owner_id.eq(owner.as_uuid())),
        )
        .set(&changeset(&patch))
        .returning(BarbershopRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(BarbershopRow::into_domain))
    }

    async fn delete_unscoped(&self, id: BarbershopId) -> Result<bool, BarbershopRepositoryError> {
        let mut conn = self.conn().await?;

        let deleted = diesel::delete(barbershops::table.filter(barbershops::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_failure(classify(err)))?;

        Ok(deleted > 0)
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: BarbershopId,
    ) -> Result<Option<Barbershop>, BarbershopRepositoryError> {
        let mut conn = self.conn().await?;

        let row: Option<BarbershopRow> = diesel::delete(
            barbershops::table
                .filter(barbershops::id.eq(id.as_uuid()))
                .filter(barbershops::owner_id.eq(owner.as_uuid())),
        )
        .returning(BarbershopRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_failure(classify(err)))?;

        Ok(row.map(BarbershopRow::into_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn foreign_key_violations_read_as_dependents() {
        let error = map_failure(DbFailure::ForeignKey("employees_barbershop_id_fkey".to_owned()));
        assert_eq!(error, BarbershopRepositoryError::has_dependents());
    }
}
