//! Port for barbershop storage.
//!
//! The scoped read/update/delete surface lives on
//! [`crate::domain::scope::ScopedRepository`]; this port adds the insert.

use async_trait::async_trait;

use crate::domain::barbershop::{Barbershop, NewBarbershop};
use crate::domain::id::UserId;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by barbershop repository adapters.
    pub enum BarbershopRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "barbershop repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "barbershop repository query failed: {message}",
        /// Employees or services still reference the barbershop.
        HasDependents => "barbershop still has employees or services",
    }
}

/// Port for creating barbershops under an owner.
#[async_trait]
pub trait BarbershopRepository: Send + Sync {
    /// Insert a new barbershop owned by `owner`.
    async fn insert(
        &self,
        owner: UserId,
        barbershop: NewBarbershop,
    ) -> Result<Barbershop, BarbershopRepositoryError>;
}
