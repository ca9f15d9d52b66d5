//! Read-only project lookups served to sibling services.

use super::ProjectServiceResult;
use crate::context::RequestContext;
use crate::project::{
    domain::{ProjectId, Tag, TagId},
    ports::{ProjectRepository, TagRepository},
};
use std::sync::Arc;

/// Answers existence and tag lookups for the task service. Service-to-service
/// traffic is trusted, so nothing here is gated.
#[derive(Clone)]
pub struct ProjectCatalogService<S>
where
    S: ProjectRepository + TagRepository,
{
    store: Arc<S>,
}

impl<S> ProjectCatalogService<S>
where
    S: ProjectRepository + TagRepository,
{
    /// Creates a catalog over the project store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns `true` when the project exists.
    ///
    /// # Errors
    ///
    /// Returns cancellation or repository failures.
    pub async fn project_exists(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> ProjectServiceResult<bool> {
        ctx.ensure_active()?;
        Ok(self.store.find_project(project_id).await?.is_some())
    }

    /// Returns the tags for `ids`, skipping unknown identifiers.
    ///
    /// # Errors
    ///
    /// Returns cancellation or repository failures.
    pub async fn tags_by_ids(
        &self,
        ctx: &RequestContext,
        ids: &[TagId],
    ) -> ProjectServiceResult<Vec<Tag>> {
        ctx.ensure_active()?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.store.find_tags(ids).await?)
    }
}
