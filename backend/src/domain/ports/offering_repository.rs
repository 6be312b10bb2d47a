//! Port for service offering storage.

use async_trait::async_trait;

use crate::domain::id::{BarbershopId, ServiceOfferingId};
use crate::domain::offering::{NewServiceOffering, ServiceOffering};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by service offering repository adapters.
    pub enum OfferingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "service repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "service repository query failed: {message}",
        /// Appointments still reference the service.
        HasDependents => "service still has appointments",
    }
}

/// Port for creating offerings and resolving them within one barbershop.
#[async_trait]
pub trait ServiceOfferingRepository: Send + Sync {
    /// Insert a new offering.
    async fn insert(
        &self,
        offering: NewServiceOffering,
    ) -> Result<ServiceOffering, OfferingRepositoryError>;

    /// Resolve an offering only if it belongs to the given barbershop. Used
    /// by the appointment consistency check, which scopes the service to the
    /// employee's shop rather than to the principal.
    async fn find_in_barbershop(
        &self,
        barbershop_id: BarbershopId,
        id: ServiceOfferingId,
    ) -> Result<Option<ServiceOffering>, OfferingRepositoryError>;

    /// Count offerings attached to a barbershop.
    async fn count_for_barbershop(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<u64, OfferingRepositoryError>;
}
