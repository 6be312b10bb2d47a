//! Port for employee storage.

use async_trait::async_trait;

use crate::domain::employee::{Employee, NewEmployeeRecord};
use crate::domain::id::{BarbershopId, UserId};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by employee repository adapters.
    pub enum EmployeeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "employee repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "employee repository query failed: {message}",
        /// The referenced user already has an employee binding somewhere.
        DuplicateUser => "user is already bound as an employee",
        /// Appointments still reference the employee.
        HasDependents => "employee still has appointments",
    }
}

/// Port for creating employees and checking the one-binding-per-user
/// invariant.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Insert a new employee binding. Fails with
    /// [`EmployeeRepositoryError::DuplicateUser`] when the user is already
    /// bound, which backstops the advisory pre-check at the store.
    async fn insert(
        &self,
        employee: NewEmployeeRecord,
    ) -> Result<Employee, EmployeeRepositoryError>;

    /// Find an existing binding for a user, regardless of barbershop or
    /// owner. Uniqueness is system-wide.
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError>;

    /// Count employees attached to a barbershop.
    async fn count_for_barbershop(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<u64, EmployeeRepositoryError>;
}
