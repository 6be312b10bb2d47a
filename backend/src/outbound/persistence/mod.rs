//! Diesel-backed persistence adapters.
//!
//! Each repository implements one driven port from the domain plus, where
//! the entity has a per-id surface, the scoped read/mutate contract. The
//! ownership predicate always travels inside the SQL; nothing is fetched
//! first and checked in memory.

pub mod db_errors;
pub mod diesel_appointment_repository;
pub mod diesel_barbershop_repository;
pub mod diesel_breaking_time_repository;
pub mod diesel_employee_repository;
pub mod diesel_offering_repository;
pub mod diesel_schedule_repository;
pub mod diesel_user_repository;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_barbershop_repository::DieselBarbershopRepository;
pub use diesel_breaking_time_repository::DieselBreakingTimeRepository;
pub use diesel_employee_repository::DieselEmployeeRepository;
pub use diesel_offering_repository::DieselOfferingRepository;
pub use diesel_schedule_repository::DieselScheduleRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
