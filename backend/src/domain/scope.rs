//! Ownership scoping: reachability, denial policy, and mutation strategies.
//!
//! Every per-id operation over an owned resource resolves the resource
//! through a query filtered along the ownership chain (see
//! [`ScopedRepository`]). A failed resolution is a [`AuthzDenial`], tagged at
//! the call site as either hidden (reported as not-found, so callers cannot
//! distinguish "missing" from "not yours") or explicit (reported as
//! forbidden, used by the cross-resource checks that deliberately surface a
//! mismatch).
//!
//! Mutations additionally pick a [`MutationScope`] strategy:
//!
//! - [`AdvisoryScope`] resolves first and then mutates by bare id. This is
//!   the default and intentionally preserves a check-then-act window: a
//!   concurrent delete between the two steps surfaces as not-found.
//! - [`AtomicScope`] issues a single conditional statement filtered by the
//!   ownership predicate, closing that window at the store.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::id::UserId;

/// Authorization denial with an explicit information-hiding policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthzDenial {
    /// Collapse "does not exist" and "not yours" into one not-found outcome.
    Hidden { resource: &'static str },
    /// Surface the denial as forbidden with a caller-facing explanation.
    Explicit { message: &'static str },
}

impl AuthzDenial {
    pub const fn hidden(resource: &'static str) -> Self {
        Self::Hidden { resource }
    }

    pub const fn explicit(message: &'static str) -> Self {
        Self::Explicit { message }
    }
}

impl From<AuthzDenial> for Error {
    fn from(denial: AuthzDenial) -> Self {
        match denial {
            AuthzDenial::Hidden { resource } => Self::not_found(format!("{resource} not found")),
            AuthzDenial::Explicit { message } => Self::forbidden(message),
        }
    }
}

/// Failure of a scoped operation: either an authorization denial or an
/// underlying store error.
#[derive(Debug)]
pub enum ScopeError<E> {
    Denied(AuthzDenial),
    Store(E),
}

impl<E> ScopeError<E> {
    /// Convert into a domain error, mapping store errors with `map_store`.
    pub fn into_domain(self, map_store: impl FnOnce(E) -> Error) -> Error {
        match self {
            Self::Denied(denial) => denial.into(),
            Self::Store(error) => map_store(error),
        }
    }
}

/// Store port for one owned entity type, queried along its ownership chain.
///
/// `find_for_owner` must be implemented as a single filtered query (the
/// predicate joins up to the owning user), never as fetch-then-check.
#[async_trait]
pub trait ScopedRepository: Send + Sync {
    /// Resource name used in hidden-denial messages ("Appointment not found").
    const RESOURCE: &'static str;

    type Id: Copy + Send + Sync + 'static;
    type Entity: Send + 'static;
    type Patch: Send + 'static;
    type Error: std::error::Error + Send + 'static;

    /// Resolve the entity if it is reachable from `owner`.
    async fn find_for_owner(
        &self,
        owner: UserId,
        id: Self::Id,
    ) -> Result<Option<Self::Entity>, Self::Error>;

    /// List every entity reachable from `owner`.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Self::Entity>, Self::Error>;

    /// Apply a patch by bare id, without an ownership predicate.
    async fn update_unscoped(
        &self,
        id: Self::Id,
        patch: Self::Patch,
    ) -> Result<Option<Self::Entity>, Self::Error>;

    /// Apply a patch in a single statement conditional on ownership.
    async fn update_for_owner(
        &self,
        owner: UserId,
        id: Self::Id,
        patch: Self::Patch,
    ) -> Result<Option<Self::Entity>, Self::Error>;

    /// Delete by bare id, without an ownership predicate.
    async fn delete_unscoped(&self, id: Self::Id) -> Result<bool, Self::Error>;

    /// Delete in a single statement conditional on ownership, returning the
    /// removed entity.
    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: Self::Id,
    ) -> Result<Option<Self::Entity>, Self::Error>;
}

/// Strategy deciding how an ownership check combines with the mutation.
#[async_trait]
pub trait MutationScope: Send + Sync {
    /// Update `id` under `owner`, returning the updated entity.
    async fn update<R: ScopedRepository>(
        &self,
        repo: &R,
        owner: UserId,
        id: R::Id,
        patch: R::Patch,
    ) -> Result<R::Entity, ScopeError<R::Error>>;

    /// Delete `id` under `owner`, returning the entity as it was.
    async fn delete<R: ScopedRepository>(
        &self,
        repo: &R,
        owner: UserId,
        id: R::Id,
    ) -> Result<R::Entity, ScopeError<R::Error>>;
}

/// Resolve-then-act strategy (default). The window between the resolve and
/// the mutation is deliberate; see the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvisoryScope;

#[async_trait]
impl MutationScope for AdvisoryScope {
    async fn update<R: ScopedRepository>(
        &self,
        repo: &R,
        owner: UserId,
        id: R::Id,
        patch: R::Patch,
    ) -> Result<R::Entity, ScopeError<R::Error>> {
        let denied = || ScopeError::Denied(AuthzDenial::hidden(R::RESOURCE));
        if repo
            .find_for_owner(owner, id)
            .await
            .map_err(ScopeError::Store)?
            .is_none()
        {
            return Err(denied());
        }
        repo.update_unscoped(id, patch)
            .await
            .map_err(ScopeError::Store)?
            .ok_or_else(denied)
    }

    async fn delete<R: ScopedRepository>(
        &self,
        repo: &R,
        owner: UserId,
        id: R::Id,
    ) -> Result<R::Entity, ScopeError<R::Error>> {
        let denied = || ScopeError::Denied(AuthzDenial::hidden(R::RESOURCE));
        let Some(entity) = repo
            .find_for_owner(owner, id)
            .await
            .map_err(ScopeError::Store)?
        else {
            return Err(denied());
        };
        if !repo.delete_unscoped(id).await.map_err(ScopeError::Store)? {
            return Err(denied());
        }
        Ok(entity)
    }
}

/// Single-statement conditional strategy: the ownership predicate travels
/// with the mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicScope;

#[async_trait]
impl MutationScope for AtomicScope {
    async fn update<R: ScopedRepository>(
        &self,
        repo: &R,
        owner: UserId,
        id: R::Id,
        patch: R::Patch,
    ) -> Result<R::Entity, ScopeError<R::Error>> {
        repo.update_for_owner(owner, id, patch)
            .await
            .map_err(ScopeError::Store)?
            .ok_or(ScopeError::Denied(AuthzDenial::hidden(R::RESOURCE)))
    }

    async fn delete<R: ScopedRepository>(
        &self,
        repo: &R,
        owner: UserId,
        id: R::Id,
    ) -> Result<R::Entity, ScopeError<R::Error>> {
        repo.delete_for_owner(owner, id)
            .await
            .map_err(ScopeError::Store)?
            .ok_or(ScopeError::Denied(AuthzDenial::hidden(R::RESOURCE)))
    }
}
