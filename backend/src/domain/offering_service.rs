//! Service offering domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::barbershop::{Barbershop, BarbershopPatch};
use crate::domain::error::Error;
use crate::domain::id::{BarbershopId, ServiceOfferingId, UserId};
use crate::domain::offering::{self, NewServiceOffering, ServiceOffering, ServiceOfferingPatch};
use crate::domain::ports::{
    BarbershopRepositoryError, OfferingRepositoryError, ServiceOfferingOps,
    ServiceOfferingRepository,
};
use crate::domain::scope::{AuthzDenial, MutationScope, ScopedRepository};

/// Service offering service implementing [`ServiceOfferingOps`].
#[derive(Clone)]
pub struct ServiceOfferingService<O, B, S> {
    offerings: Arc<O>,
    barbershops: Arc<B>,
    scope: S,
}

impl<O, B, S> ServiceOfferingService<O, B, S> {
    /// Create a new service with the given collaborators.
    pub fn new(offerings: Arc<O>, barbershops: Arc<B>, scope: S) -> Self {
        Self {
            offerings,
            barbershops,
            scope,
        }
    }
}

fn map_store_error(error: OfferingRepositoryError) -> Error {
    match error {
        OfferingRepositoryError::HasDependents => {
            Error::conflict("Service still has appointments")
        }
        OfferingRepositoryError::Connection { message }
        | OfferingRepositoryError::Query { message } => {
            Error::internal(format!("service repository error: {message}"))
        }
    }
}

fn map_barbershop_error(error: BarbershopRepositoryError) -> Error {
    Error::internal(format!("barbershop repository error: {error}"))
}

#[async_trait]
impl<O, B, S> ServiceOfferingOps for ServiceOfferingService<O, B, S>
where
    O: ServiceOfferingRepository
        + ScopedRepository<
            Id = ServiceOfferingId,
            Entity = ServiceOffering,
            Patch = ServiceOfferingPatch,
            Error = OfferingRepositoryError,
        >,
    B: ScopedRepository<
            Id = BarbershopId,
            Entity = Barbershop,
            Patch = BarbershopPatch,
            Error = BarbershopRepositoryError,
        >,
    S: MutationScope,
{
    async fn create(
        &self,
        owner: UserId,
        request: NewServiceOffering,
    ) -> Result<ServiceOffering, Error> {
        if self
            .barbershops
            .find_for_owner(owner, request.barbershop_id)
            .await
            .map_err(map_barbershop_error)?
            .is_none()
        {
            return Err(
                AuthzDenial::explicit("You can only add services to your own barbershops").into(),
            );
        }

        self.offerings
            .insert(request)
            .await
            .map_err(map_store_error)
    }

    async fn list(&self, owner: UserId) -> Result<Vec<ServiceOffering>, Error> {
        let offerings = self
            .offerings
            .list_for_owner(owner)
            .await
            .map_err(map_store_error)?;
        if offerings.is_empty() {
            return Err(Error::not_found("No services found"));
        }
        Ok(offerings)
    }

    async fn get(&self, owner: UserId, id: ServiceOfferingId) -> Result<ServiceOffering, Error> {
        self.offerings
            .find_for_owner(owner, id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| AuthzDenial::hidden(offering::RESOURCE).into())
    }

    async fn update(
        &self,
        owner: UserId,
        id: ServiceOfferingId,
        patch: ServiceOfferingPatch,
    ) -> Result<ServiceOffering, Error> {
        self.scope
            .update(&*self.offerings, owner, id, patch)
            .await
            .map_err(|error| error.into_domain(map_store_error))
    }

    async fn delete(
        &self,
        owner: UserId,
        id: ServiceOfferingId,
    ) -> Result<ServiceOffering, Error> {
        self.scope
            .delete(&*self.offerings, owner, id)
            .await
            .map_err(|error| error.into_domain(map_store_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn remaining_appointments_map_to_conflict() {
        let error = map_store_error(OfferingRepositoryError::has_dependents());
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "Service still has appointments");
    }
}
