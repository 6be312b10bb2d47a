//! Port for breaking time storage.

use async_trait::async_trait;

use crate::domain::breaking_time::{BreakingTime, NewBreakingTime};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by breaking time repository adapters.
    pub enum BreakingTimeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "breaking time repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "breaking time repository query failed: {message}",
    }
}

/// Port for creating breaking times.
#[async_trait]
pub trait BreakingTimeRepository: Send + Sync {
    /// Insert a new breaking time. The schedule reference has already been
    /// resolved by the consistency layer.
    async fn insert(
        &self,
        breaking_time: NewBreakingTime,
    ) -> Result<BreakingTime, BreakingTimeRepositoryError>;
}
