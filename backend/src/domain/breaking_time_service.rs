//! Breaking time domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::breaking_time::{
    self, BreakingTime, BreakingTimePatch, NewBreakingTime,
};
use crate::domain::error::Error;
use crate::domain::id::{BreakingTimeId, UserId};
use crate::domain::ports::{
    BreakingTimeOps, BreakingTimeRepository, BreakingTimeRepositoryError, ScheduleRepository,
    ScheduleRepositoryError,
};
use crate::domain::scope::{AuthzDenial, MutationScope, ScopedRepository};

/// Breaking time service implementing [`BreakingTimeOps`].
#[derive(Clone)]
pub struct BreakingTimeService<T, C, S> {
    breaking_times: Arc<T>,
    schedules: Arc<C>,
    scope: S,
}

impl<T, C, S> BreakingTimeService<T, C, S> {
    /// Create a new service with the given collaborators.
    pub fn new(breaking_times: Arc<T>, schedules: Arc<C>, scope: S) -> Self {
        Self {
            breaking_times,
            schedules,
            scope,
        }
    }
}

fn map_store_error(error: BreakingTimeRepositoryError) -> Error {
    match error {
        BreakingTimeRepositoryError::Connection { message }
        | BreakingTimeRepositoryError::Query { message } => {
            Error::internal(format!("breaking time repository error: {message}"))
        }
    }
}

fn map_schedule_error(error: ScheduleRepositoryError) -> Error {
    Error::internal(format!("schedule repository error: {error}"))
}

#[async_trait]
impl<T, C, S> BreakingTimeOps for BreakingTimeService<T, C, S>
where
    T: BreakingTimeRepository
        + ScopedRepository<
            Id = BreakingTimeId,
            Entity = BreakingTime,
            Patch = BreakingTimePatch,
            Error = BreakingTimeRepositoryError,
        >,
    C: ScheduleRepository,
    S: MutationScope,
{
    async fn create(
        &self,
        owner: UserId,
        request: NewBreakingTime,
    ) -> Result<BreakingTime, Error> {
        // The schedule is resolved by walking up to the owning user in one
        // filtered query; an unreachable schedule is an explicit denial at
        // this site.
        if self
            .schedules
            .find_for_owner(owner, request.schedule_id)
            .await
            .map_err(map_schedule_error)?
            .is_none()
        {
            return Err(AuthzDenial::explicit(
                "Schedule not found or does not belong to your barbershop",
            )
            .into());
        }

        self.breaking_times
            .insert(request)
            .await
            .map_err(map_store_error)
    }

    async fn list(&self, owner: UserId) -> Result<Vec<BreakingTime>, Error> {
        let breaking_times = self
            .breaking_times
            .list_for_owner(owner)
            .await
            .map_err(map_store_error)?;
        if breaking_times.is_empty() {
            return Err(Error::not_found("No breaking times found"));
        }
        Ok(breaking_times)
    }

    async fn get(&self, owner: UserId, id: BreakingTimeId) -> Result<BreakingTime, Error> {
        self.breaking_times
            .find_for_owner(owner, id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| AuthzDenial::hidden(breaking_time::RESOURCE).into())
    }

    async fn update(
        &self,
        owner: UserId,
        id: BreakingTimeId,
        patch: BreakingTimePatch,
    ) -> Result<BreakingTime, Error> {
        self.scope
            .update(&*self.breaking_times, owner, id, patch)
            .await
            .map_err(|error| error.into_domain(map_store_error))
    }

    async fn delete(&self, owner: UserId, id: BreakingTimeId) -> Result<BreakingTime, Error> {
        self.scope
            .delete(&*self.breaking_times, owner, id)
            .await
            .map_err(|error| error.into_domain(map_store_error))
    }
}
