//! Multi-tenant barbershop booking backend.
//!
//! Every operation passes three gates before touching storage: payload
//! validation against per-operation schemas, ownership-scoped resolution
//! along the user → barbershop → employee → schedule chain, and
//! cross-resource consistency checks for creates that reference sibling
//! resources. See the `domain` module for the contracts and the `inbound` /
//! `outbound` modules for the adapters.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
