//! Driving ports: the use-case surface the HTTP adapter depends on.
//!
//! Each trait mirrors one resource's operation set. Implementations live in
//! the domain services; handlers hold them as `Arc<dyn _>` so they stay
//! testable without I/O.

use async_trait::async_trait;

use crate::domain::appointment::{Appointment, AppointmentPatch, NewAppointment};
use crate::domain::barbershop::{Barbershop, BarbershopPatch, NewBarbershop};
use crate::domain::breaking_time::{BreakingTime, BreakingTimePatch, NewBreakingTime};
use crate::domain::employee::{Employee, EmployeePatch, NewEmployee};
use crate::domain::error::Error;
use crate::domain::id::{
    AppointmentId, BarbershopId, BreakingTimeId, EmployeeId, ServiceOfferingId, UserId,
};
use crate::domain::offering::{NewServiceOffering, ServiceOffering, ServiceOfferingPatch};
use crate::domain::user::{LoginRequest, SignupRequest, User};

/// Account signup, login, and principal lookup.
#[async_trait]
pub trait AccountOps: Send + Sync {
    /// Register a new account.
    async fn signup(&self, request: SignupRequest) -> Result<User, Error>;

    /// Verify credentials and return the account on success.
    async fn login(&self, request: LoginRequest) -> Result<User, Error>;

    /// Resolve the authenticated principal's account.
    async fn fetch_user(&self, id: UserId) -> Result<User, Error>;
}

/// Barbershop operations, all scoped to the acting principal.
#[async_trait]
pub trait BarbershopOps: Send + Sync {
    async fn create(&self, owner: UserId, request: NewBarbershop) -> Result<Barbershop, Error>;
    async fn list(&self, owner: UserId) -> Result<Vec<Barbershop>, Error>;
    async fn get(&self, owner: UserId, id: BarbershopId) -> Result<Barbershop, Error>;
    async fn update(
        &self,
        owner: UserId,
        id: BarbershopId,
        patch: BarbershopPatch,
    ) -> Result<Barbershop, Error>;
    async fn delete(&self, owner: UserId, id: BarbershopId) -> Result<Barbershop, Error>;
}

/// Employee operations, all scoped to the acting principal.
#[async_trait]
pub trait EmployeeOps: Send + Sync {
    async fn create(&self, owner: UserId, request: NewEmployee) -> Result<Employee, Error>;
    async fn list(&self, owner: UserId) -> Result<Vec<Employee>, Error>;
    async fn get(&self, owner: UserId, id: EmployeeId) -> Result<Employee, Error>;
    async fn update(
        &self,
        owner: UserId,
        id: EmployeeId,
        patch: EmployeePatch,
    ) -> Result<Employee, Error>;
    async fn delete(&self, owner: UserId, id: EmployeeId) -> Result<Employee, Error>;
}

/// Service offering operations, all scoped to the acting principal.
#[async_trait]
pub trait ServiceOfferingOps: Send + Sync {
    async fn create(
        &self,
        owner: UserId,
        request: NewServiceOffering,
    ) -> Result<ServiceOffering, Error>;
    async fn list(&self, owner: UserId) -> Result<Vec<ServiceOffering>, Error>;
    async fn get(&self, owner: UserId, id: ServiceOfferingId) -> Result<ServiceOffering, Error>;
    async fn update(
        &self,
        owner: UserId,
        id: ServiceOfferingId,
        patch: ServiceOfferingPatch,
    ) -> Result<ServiceOffering, Error>;
    async fn delete(&self, owner: UserId, id: ServiceOfferingId)
    -> Result<ServiceOffering, Error>;
}

/// Appointment operations, all scoped to the acting principal.
#[async_trait]
pub trait AppointmentOps: Send + Sync {
    async fn create(&self, owner: UserId, request: NewAppointment) -> Result<Appointment, Error>;
    async fn list(&self, owner: UserId) -> Result<Vec<Appointment>, Error>;
    async fn get(&self, owner: UserId, id: AppointmentId) -> Result<Appointment, Error>;
    async fn update(
        &self,
        owner: UserId,
        id: AppointmentId,
        patch: AppointmentPatch,
    ) -> Result<Appointment, Error>;
    async fn delete(&self, owner: UserId, id: AppointmentId) -> Result<Appointment, Error>;
}

/// Breaking time operations, all scoped to the acting principal.
#[async_trait]
pub trait BreakingTimeOps: Send + Sync {
    async fn create(&self, owner: UserId, request: NewBreakingTime)
    -> Result<BreakingTime, Error>;
    async fn list(&self, owner: UserId) -> Result<Vec<BreakingTime>, Error>;
    async fn get(&self, owner: UserId, id: BreakingTimeId) -> Result<BreakingTime, Error>;
    async fn update(
        &self,
        owner: UserId,
        id: BreakingTimeId,
        patch: BreakingTimePatch,
    ) -> Result<BreakingTime, Error>;
    async fn delete(&self, owner: UserId, id: BreakingTimeId) -> Result<BreakingTime, Error>;
}
