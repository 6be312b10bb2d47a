//! Port for schedule storage.
//!
//! Schedules have no HTTP surface; they are created with their employee and
//! resolved when a breaking time references one.

use async_trait::async_trait;

use crate::domain::id::{EmployeeId, ScheduleId, UserId};
use crate::domain::schedule::Schedule;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by schedule repository adapters.
    pub enum ScheduleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "schedule repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "schedule repository query failed: {message}",
    }
}

/// Port for schedule creation and scoped resolution.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Insert the schedule for a freshly created employee.
    async fn insert(&self, employee_id: EmployeeId) -> Result<Schedule, ScheduleRepositoryError>;

    /// Resolve a schedule by walking Schedule→Employee→Barbershop→owner in a
    /// single filtered query.
    async fn find_for_owner(
        &self,
        owner: UserId,
        id: ScheduleId,
    ) -> Result<Option<Schedule>, ScheduleRepositoryError>;
}

/// Fixture implementation for tests that do not exercise schedules.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureScheduleRepository;

#[async_trait]
impl ScheduleRepository for FixtureScheduleRepository {
    async fn insert(&self, employee_id: EmployeeId) -> Result<Schedule, ScheduleRepositoryError> {
        let now = chrono::Utc::now();
        Ok(Schedule {
            id: ScheduleId::random(),
            employee_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_for_owner(
        &self,
        _owner: UserId,
        _id: ScheduleId,
    ) -> Result<Option<Schedule>, ScheduleRepositoryError> {
        Ok(None)
    }
}
