//! Domain layer: entities, validation, ownership scoping, and services.
//!
//! Purpose: express the booking hierarchy (user → barbershop → employee →
//! schedule → breaking time, with services and appointments hanging off the
//! shop) as strongly typed entities, and enforce the three contracts every
//! operation passes through: payload validation, ownership-scoped
//! resolution, and cross-resource consistency.
//!
//! Inbound adapters depend on the driving ports in [`ports::operations`];
//! storage adapters implement the driven ports in [`ports`] plus
//! [`scope::ScopedRepository`].

pub mod appointment;
pub mod barbershop;
pub mod breaking_time;
pub mod employee;
pub mod error;
pub mod id;
pub mod offering;
pub mod ports;
pub mod schedule;
pub mod scope;
pub mod user;
pub mod validation;

mod account_service;
mod appointment_service;
mod barbershop_service;
mod breaking_time_service;
mod employee_service;
mod offering_service;

pub use self::account_service::AccountService;
pub use self::appointment_service::AppointmentService;
pub use self::barbershop_service::BarbershopService;
pub use self::breaking_time_service::BreakingTimeService;
pub use self::employee_service::EmployeeService;
pub use self::error::{Error, ErrorCode};
pub use self::id::{
    AppointmentId, BarbershopId, BreakingTimeId, EmployeeId, ScheduleId, ServiceOfferingId, UserId,
};
pub use self::offering_service::ServiceOfferingService;
pub use self::scope::{AdvisoryScope, AtomicScope, AuthzDenial, MutationScope, ScopedRepository};

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
