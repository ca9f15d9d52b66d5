//! Breaker-guarded project catalog client.

use async_trait::async_trait;

use crate::project::domain::{ProjectId, Tag, TagId};
use crate::remote::{CircuitBreaker, RemoteResult};
use crate::task::ports::ProjectCatalog;

/// Project catalog client guarded by a circuit breaker.
#[derive(Debug, Clone)]
pub struct BreakerProjectCatalog<P> {
    inner: P,
    breaker: CircuitBreaker,
}

impl<P: ProjectCatalog> BreakerProjectCatalog<P> {
    /// Wraps `inner` with `breaker`.
    #[must_use]
    pub const fn new(inner: P, breaker: CircuitBreaker) -> Self {
        Self { inner, breaker }
    }

    /// Returns the breaker guarding this client.
    #[must_use]
    pub const fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }
}

#[async_trait]
impl<P: ProjectCatalog> ProjectCatalog for BreakerProjectCatalog<P> {
    async fn project_exists(&self, project_id: ProjectId) -> RemoteResult<bool> {
        self.breaker.call(self.inner.project_exists(project_id)).await
    }

    async fn tags_by_ids(&self, ids: &[TagId]) -> RemoteResult<Vec<Tag>> {
        self.breaker.call(self.inner.tags_by_ids(ids)).await
    }
}
