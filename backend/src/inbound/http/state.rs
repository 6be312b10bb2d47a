//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountOps, AppointmentOps, BarbershopOps, BreakingTimeOps, EmployeeOps, ServiceOfferingOps,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountOps>,
    pub barbershops: Arc<dyn BarbershopOps>,
    pub employees: Arc<dyn EmployeeOps>,
    pub offerings: Arc<dyn ServiceOfferingOps>,
    pub appointments: Arc<dyn AppointmentOps>,
    pub breaking_times: Arc<dyn BreakingTimeOps>,
}
