//! Domain ports: driven stores and driving operations.

pub(crate) mod macros;

pub mod appointment_repository;
pub mod barbershop_repository;
pub mod breaking_time_repository;
pub mod employee_repository;
pub mod offering_repository;
pub mod operations;
pub mod password_scheme;
pub mod schedule_repository;
pub mod user_repository;

pub use appointment_repository::{AppointmentRepository, AppointmentRepositoryError};
pub use barbershop_repository::{BarbershopRepository, BarbershopRepositoryError};
pub use breaking_time_repository::{BreakingTimeRepository, BreakingTimeRepositoryError};
pub use employee_repository::{EmployeeRepository, EmployeeRepositoryError};
pub use offering_repository::{OfferingRepositoryError, ServiceOfferingRepository};
pub use operations::{
    AccountOps, AppointmentOps, BarbershopOps, BreakingTimeOps, EmployeeOps, ServiceOfferingOps,
};
pub use password_scheme::{FixturePasswordScheme, PasswordScheme, PasswordSchemeError};
pub use schedule_repository::{
    FixtureScheduleRepository, ScheduleRepository, ScheduleRepositoryError,
};
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};

#[cfg(test)]
pub use password_scheme::MockPasswordScheme;
#[cfg(test)]
pub use schedule_repository::MockScheduleRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
