//! Employee domain service.
//!
//! Employee creation is the busiest consistency site in the system: the
//! target barbershop must belong to the acting principal, the referenced
//! user must exist, and that user must not already be bound as an employee
//! anywhere.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::barbershop::{Barbershop, BarbershopPatch};
use crate::domain::employee::{self, Employee, EmployeePatch, NewEmployee, NewEmployeeRecord};
use crate::domain::error::Error;
use crate::domain::id::{BarbershopId, EmployeeId, UserId};
use crate::domain::ports::{
    BarbershopRepositoryError, EmployeeOps, EmployeeRepository, EmployeeRepositoryError,
    ScheduleRepository, ScheduleRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::scope::{AuthzDenial, MutationScope, ScopedRepository};

/// Employee service implementing [`EmployeeOps`].
#[derive(Clone)]
pub struct EmployeeService<E, B, U, C, S> {
    employees: Arc<E>,
    barbershops: Arc<B>,
    users: Arc<U>,
    schedules: Arc<C>,
    scope: S,
}

impl<E, B, U, C, S> EmployeeService<E, B, U, C, S> {
    /// Create a new service with the given collaborators.
    pub fn new(
        employees: Arc<E>,
        barbershops: Arc<B>,
        users: Arc<U>,
        schedules: Arc<C>,
        scope: S,
    ) -> Self {
        Self {
            employees,
            barbershops,
            users,
            schedules,
            scope,
        }
    }
}

fn duplicate_binding_error() -> Error {
    Error::conflict("User is already an employee")
}

fn map_store_error(error: EmployeeRepositoryError) -> Error {
    match error {
        EmployeeRepositoryError::DuplicateUser => duplicate_binding_error(),
        EmployeeRepositoryError::HasDependents => {
            Error::conflict("Employee still has appointments")
        }
        EmployeeRepositoryError::Connection { message }
        | EmployeeRepositoryError::Query { message } => {
            Error::internal(format!("employee repository error: {message}"))
        }
    }
}

fn map_barbershop_error(error: BarbershopRepositoryError) -> Error {
    Error::internal(format!("barbershop repository error: {error}"))
}

fn map_user_error(error: UserRepositoryError) -> Error {
    Error::internal(format!("user repository error: {error}"))
}

fn map_schedule_error(error: ScheduleRepositoryError) -> Error {
    Error::internal(format!("schedule repository error: {error}"))
}

#[async_trait]
impl<E, B, U, C, S> EmployeeOps for EmployeeService<E, B, U, C, S>
where
    E: EmployeeRepository
        + ScopedRepository<
            Id = EmployeeId,
            Entity = Employee,
            Patch = EmployeePatch,
            Error = EmployeeRepositoryError,
        >,
    B: ScopedRepository<
            Id = BarbershopId,
            Entity = Barbershop,
            Patch = BarbershopPatch,
            Error = BarbershopRepositoryError,
        >,
    U: UserRepository,
    C: ScheduleRepository,
    S: MutationScope,
{
    async fn create(&self, owner: UserId, request: NewEmployee) -> Result<Employee, Error> {
        // Explicit denial: this site deliberately reveals that the shop is
        // not the caller's, unlike the per-id lookups below.
        if self
            .barbershops
            .find_for_owner(owner, request.barbershop_id)
            .await
            .map_err(map_barbershop_error)?
            .is_none()
        {
            return Err(
                AuthzDenial::explicit("You can only add employees to your own barbershops").into(),
            );
        }

        let Some(target) = self
            .users
            .find_by_email(&request.email)
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::not_found("User not found")
                .with_details(json!({ "email": "User with this email does not exist" })));
        };

        // One binding per user, system-wide; the unique index backstops this
        // pre-check against concurrent creates.
        if self
            .employees
            .find_by_user(target.user.id)
            .await
            .map_err(map_store_error)?
            .is_some()
        {
            return Err(duplicate_binding_error());
        }

        let created = self
            .employees
            .insert(NewEmployeeRecord {
                user_id: target.user.id,
                barbershop_id: request.barbershop_id,
                role: request.role,
                phone_number: request.phone_number,
            })
            .await
            .map_err(map_store_error)?;

        // 1:1 invariant: every employee has a schedule from birth.
        self.schedules
            .insert(created.id)
            .await
            .map_err(map_schedule_error)?;

        Ok(created)
    }

    async fn list(&self, owner: UserId) -> Result<Vec<Employee>, Error> {
        let employees = self
            .employees
            .list_for_owner(owner)
            .await
            .map_err(map_store_error)?;
        if employees.is_empty() {
            return Err(Error::not_found("No employees found"));
        }
        Ok(employees)
    }

    async fn get(&self, owner: UserId, id: EmployeeId) -> Result<Employee, Error> {
        self.employees
            .find_for_owner(owner, id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| AuthzDenial::hidden(employee::RESOURCE).into())
    }

    async fn update(
        &self,
        owner: UserId,
        id: EmployeeId,
        patch: EmployeePatch,
    ) -> Result<Employee, Error> {
        self.scope
            .update(&*self.employees, owner, id, patch)
            .await
            .map_err(|error| error.into_domain(map_store_error))
    }

    async fn delete(&self, owner: UserId, id: EmployeeId) -> Result<Employee, Error> {
        self.scope
            .delete(&*self.employees, owner, id)
            .await
            .map_err(|error| error.into_domain(map_store_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn duplicate_binding_maps_to_conflict() {
        let error = map_store_error(EmployeeRepositoryError::duplicate_user());
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "User is already an employee");
    }

    #[test]
    fn remaining_appointments_map_to_conflict() {
        let error = map_store_error(EmployeeRepositoryError::has_dependents());
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "Employee still has appointments");
    }
}
