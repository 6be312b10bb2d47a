//! Port for appointment storage.

use async_trait::async_trait;

use crate::domain::appointment::{Appointment, NewAppointmentRecord};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by appointment repository adapters.
    pub enum AppointmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "appointment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "appointment repository query failed: {message}",
    }
}

/// Port for creating appointments.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert a new appointment. The referential invariants have already
    /// been checked by the consistency layer.
    async fn insert(
        &self,
        appointment: NewAppointmentRecord,
    ) -> Result<Appointment, AppointmentRepositoryError>;
}
