//! Appointment domain service.
//!
//! Appointment creation is the one place where a cross-tenant mismatch is
//! surfaced explicitly (403) instead of hidden behind not-found: the
//! employee must be reachable from the acting principal, and the service
//! must belong to that employee's barbershop.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::appointment::{
    self, Appointment, AppointmentPatch, NewAppointment, NewAppointmentRecord,
};
use crate::domain::employee::{Employee, EmployeePatch};
use crate::domain::error::Error;
use crate::domain::id::{AppointmentId, EmployeeId, UserId};
use crate::domain::ports::{
    AppointmentOps, AppointmentRepository, AppointmentRepositoryError, EmployeeRepositoryError,
    OfferingRepositoryError, ServiceOfferingRepository,
};
use crate::domain::scope::{AuthzDenial, MutationScope, ScopedRepository};

/// Appointment service implementing [`AppointmentOps`].
#[derive(Clone)]
pub struct AppointmentService<A, E, O, S> {
    appointments: Arc<A>,
    employees: Arc<E>,
    offerings: Arc<O>,
    scope: S,
}

impl<A, E, O, S> AppointmentService<A, E, O, S> {
    /// Create a new service with the given collaborators.
    pub fn new(appointments: Arc<A>, employees: Arc<E>, offerings: Arc<O>, scope: S) -> Self {
        Self {
            appointments,
            employees,
            offerings,
            scope,
        }
    }
}

fn map_store_error(error: AppointmentRepositoryError) -> Error {
    match error {
        AppointmentRepositoryError::Connection { message }
        | AppointmentRepositoryError::Query { message } => {
            Error::internal(format!("appointment repository error: {message}"))
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
impl<A, E, O, S> AppointmentOps for AppointmentService<A, E, O, S>
where
    A: AppointmentRepository
        + ScopedRepository<
            Id = AppointmentId,
            Entity = Appointment,
            Patch = AppointmentPatch,
            Error = AppointmentRepositoryError,
        >,
    E: ScopedRepository<
            Id = EmployeeId,
            Entity = Employee,
            Patch = EmployeePatch,
            Error = EmployeeRepositoryError,
        >,
    O: ServiceOfferingRepository,
    S: MutationScope,
{
    async fn create(&self, owner: UserId, request: NewAppointment) -> Result<Appointment, Error> {
        let Some(employee) = self
            .employees
            .find_for_owner(owner, request.employee_id)
            .await
            .map_err(map_employee_error)?
        else {
            return Err(AuthzDenial::explicit(
                "Employee not found or does not belong to your barbershop",
            )
            .into());
        };

        // The service is scoped to the employee's shop, not to the caller:
        // an offering the caller owns elsewhere must still be rejected.
        if self
            .offerings
            .find_in_barbershop(employee.barbershop_id, request.service_id)
            .await
            .map_err(map_offering_error)?
            .is_none()
        {
            return Err(AuthzDenial::explicit(
                "Service not found or does not belong to the same barbershop",
            )
            .into());
        }

        self.appointments
            .insert(NewAppointmentRecord::pending(request))
            .await
            .map_err(map_store_error)
    }

    async fn list(&self, owner: UserId) -> Result<Vec<Appointment>, Error> {
        let appointments = self
            .appointments
            .list_for_owner(owner)
            .await
            .map_err(map_store_error)?;
        if appointments.is_empty() {
            return Err(Error::not_found("No appointments found"));
        }
        Ok(appointments)
    }

    async fn get(&self, owner: UserId, id: AppointmentId) -> Result<Appointment, Error> {
        self.appointments
            .find_for_owner(owner, id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| AuthzDenial::hidden(appointment::RESOURCE).into())
    }

    async fn update(
        &self,
        owner: UserId,
        id: AppointmentId,
        patch: AppointmentPatch,
    ) -> Result<Appointment, Error> {
        self.scope
            .update(&*self.appointments, owner, id, patch)
            .await
            .map_err(|error| error.into_domain(map_store_error))
    }

    async fn delete(&self, owner: UserId, id: AppointmentId) -> Result<Appointment, Error> {
        self.scope
            .delete(&*self.appointments, owner, id)
            .await
            .map_err(|error| error.into_domain(map_store_error))
    }
}
