//! Entity Resolver Port
//!
//! Maps free-text feedback plus an optional hint to a canonical
//! team member id. Resolution is a lookup, never a registration:
//! implementations must not create members or write to any store.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Hint};

/// Entity resolution interface
///
/// A hint naming an existing member id must be returned as-is.
/// Without a confident match implementations fail with
/// [`DomainError::UnresolvedEntity`].
#[async_trait]
pub trait EntityResolver: Send + Sync {
    async fn resolve(&self, content: &str, hint: &Hint) -> Result<String, DomainError>;
}
