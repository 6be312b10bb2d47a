//! Schedule data model.
//!
//! A schedule is created automatically alongside its employee (1:1) and has
//! no HTTP surface of its own; breaking times hang off it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::{EmployeeId, ScheduleId};

/// Working schedule of a single employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub employee_id: EmployeeId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
