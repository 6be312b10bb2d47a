//! Barbershop domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::barbershop::{self, Barbershop, BarbershopPatch, NewBarbershop};
use crate::domain::error::Error;
use crate::domain::id::{BarbershopId, UserId};
use crate::domain::ports::{
    BarbershopOps, BarbershopRepository, BarbershopRepositoryError, EmployeeRepository,
    EmployeeRepositoryError, OfferingRepositoryError, ServiceOfferingRepository,
};
use crate::domain::scope::{AuthzDenial, MutationScope, ScopedRepository};

/// Barbershop service implementing [`BarbershopOps`].
#[derive(Clone)]
pub struct BarbershopService<B, E, O, S> {
    barbershops: Arc<B>,
    employees: Arc<E>,
    offerings: Arc<O>,
    scope: S,
}

impl<B, E, O, S> BarbershopService<B, E, O, S> {
    /// Create a new service with the given collaborators.
    pub fn new(barbershops: Arc<B>, employees: Arc<E>, offerings: Arc<O>, scope: S) -> Self {
        Self {
            barbershops,
            employees,
            offerings,
            scope,
        }
    }
}

fn dependents_error() -> Error {
    Error::conflict("Barbershop still has employees or services")
}

fn map_store_error(error: BarbershopRepositoryError) -> Error {
    match error {
        BarbershopRepositoryError::HasDependents => dependents_error(),
        BarbershopRepositoryError::Connection { message }
        | BarbershopRepositoryError::Query { message } => {
            Error::internal(format!("barbershop repository error: {message}"))
        }
    }
}

fn map_employee_error(error: EmployeeRepositoryError) -> Error {
    Error::internal(format!("employee repository error: {error}"))
}

fn map_offering_error(error: OfferingRepositoryError) -> Error {
    Error::internal(format!("service repository error: {error}"))
}

#[async_trait]
impl<B, E, O, S> BarbershopOps for BarbershopService<B, E, O, S>
where
    B: BarbershopRepository
        + ScopedRepository<
            Id = BarbershopId,
            Entity = Barbershop,
            Patch = BarbershopPatch,
            Error = BarbershopRepositoryError,
        >,
    E: EmployeeRepository,
    O: ServiceOfferingRepository,
    S: MutationScope,
{
    async fn create(&self, owner: UserId, request: NewBarbershop) -> Result<Barbershop, Error> {
        self.barbershops
            .insert(owner, request)
            .await
            .map_err(map_store_error)
    }

    async fn list(&self, owner: UserId) -> Result<Vec<Barbershop>, Error> {
        let barbershops = self
            .barbershops
            .list_for_owner(owner)
            .await
            .map_err(map_store_error)?;
        if barbershops.is_empty() {
            return Err(Error::not_found("No barbershops found"));
        }
        Ok(barbershops)
    }

    async fn get(&self, owner: UserId, id: BarbershopId) -> Result<Barbershop, Error> {
        self.barbershops
            .find_for_owner(owner, id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| AuthzDenial::hidden(barbershop::RESOURCE).into())
    }

    async fn update(
        &self,
        owner: UserId,
        id: BarbershopId,
        patch: BarbershopPatch,
    ) -> Result<Barbershop, Error> {
        self.scope
            .update(&*self.barbershops, owner, id, patch)
            .await
            .map_err(|error| error.into_domain(map_store_error))
    }

    async fn delete(&self, owner: UserId, id: BarbershopId) -> Result<Barbershop, Error> {
        // Resolve ownership before the dependents check so a foreign shop
        // with dependents still reads as not-found.
        if self
            .barbershops
            .find_for_owner(owner, id)
            .await
            .map_err(map_store_error)?
            .is_none()
        {
            return Err(AuthzDenial::hidden(barbershop::RESOURCE).into());
        }

        let employees = self
            .employees
            .count_for_barbershop(id)
            .await
            .map_err(map_employee_error)?;
        let offerings = self
            .offerings
            .count_for_barbershop(id)
            .await
            .map_err(map_offering_error)?;
        if employees > 0 || offerings > 0 {
            return Err(dependents_error());
        }

        self.scope
            .delete(&*self.barbershops, owner, id)
            .await
            .map_err(|error| error.into_domain(map_store_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn dependent_rows_map_to_conflict() {
        let error = map_store_error(BarbershopRepositoryError::has_dependents());
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "Barbershop still has employees or services");
    }

    #[test]
    fn store_failures_map_to_internal() {
        let error = map_store_error(BarbershopRepositoryError::query("relation missing"));
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
