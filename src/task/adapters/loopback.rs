//! In-process project catalog backed directly by the project service.
//!
//! Used when both contexts run in one process: calls skip the transport but
//! still surface as remote results, so breaker wrappers behave the same way
//! they would over the network.

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::project::{
    domain::{ProjectId, Tag, TagId},
    ports::{ProjectRepository, TagRepository},
    services::ProjectCatalogService,
};
use crate::remote::{PROJECT_SERVICE, RemoteError, RemoteResult};
use crate::task::ports::ProjectCatalog;

/// [`ProjectCatalog`] calling a co-located [`ProjectCatalogService`].
#[derive(Clone)]
pub struct LoopbackProjectCatalog<S>
where
    S: ProjectRepository + TagRepository,
{
    service: ProjectCatalogService<S>,
}

impl<S> LoopbackProjectCatalog<S>
where
    S: ProjectRepository + TagRepository,
{
    /// Wraps the catalog service.
    #[must_use]
    pub const fn new(service: ProjectCatalogService<S>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S> ProjectCatalog for LoopbackProjectCatalog<S>
where
    S: ProjectRepository + TagRepository,
{
    async fn project_exists(&self, project_id: ProjectId) -> RemoteResult<bool> {
        self.service
            .project_exists(&RequestContext::internal(), project_id)
            .await
            .map_err(|err| RemoteError::call(PROJECT_SERVICE, err))
    }

    async fn tags_by_ids(&self, ids: &[TagId]) -> RemoteResult<Vec<Tag>> {
        self.service
            .tags_by_ids(&RequestContext::internal(), ids)
            .await
            .map_err(|err| RemoteError::call(PROJECT_SERVICE, err))
    }
}
