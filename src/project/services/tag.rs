//! Tag management service.

use super::{
    ProjectAuthorizer, ProjectServiceResult,
    lookup::{require_project, require_tag},
};
use crate::context::RequestContext;
use crate::pagination::{Page, PageRequest};
use crate::project::{
    domain::{ProjectId, RoleRequirement, Tag, TagId, TagName},
    ports::{ProjectStore, UserDirectory},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Creates, renames, deletes and lists project tags.
#[derive(Clone)]
pub struct TagService<S, U, C>
where
    S: ProjectStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    authorizer: ProjectAuthorizer<S, U>,
}

impl<S, U, C> TagService<S, U, C>
where
    S: ProjectStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a tag service.
    #[must_use]
    pub fn new(store: Arc<S>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            authorizer: ProjectAuthorizer::new(Arc::clone(&store), users),
            store,
            clock,
        }
    }

    /// Creates a tag in the project.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::ProjectNotFound`],
    /// [`super::ProjectServiceError::AccessDenied`] for viewers and
    /// non-members, a domain error for an invalid name, or a duplicate-tag
    /// repository error.
    pub async fn create_tag(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        name: &str,
    ) -> ProjectServiceResult<Tag> {
        require_project(&*self.store, project_id).await?;
        self.authorizer
            .authorize(ctx, project_id, RoleRequirement::AtLeastEditor)
            .await?;
        let tag = Tag::new(project_id, TagName::new(name)?, &*self.clock);
        ctx.ensure_active()?;
        self.store.store_tag(&tag).await?;
        info!(%project_id, tag_id = %tag.id(), name = %tag.name(), "tag created");
        Ok(tag)
    }

    /// Renames a tag.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::TagNotFound`], an authorization
    /// failure, a domain error for an invalid name, or a duplicate-tag
    /// repository error.
    pub async fn rename_tag(
        &self,
        ctx: &RequestContext,
        tag_id: TagId,
        name: &str,
    ) -> ProjectServiceResult<Tag> {
        let mut tag = require_tag(&*self.store, tag_id).await?;
        self.authorizer
            .authorize(ctx, tag.project_id(), RoleRequirement::AtLeastEditor)
            .await?;
        let renamed = TagName::new(name)?;
        if renamed == *tag.name() {
            return Ok(tag);
        }
        tag.rename(renamed);
        ctx.ensure_active()?;
        self.store.update_tag(&tag).await?;
        info!(%tag_id, name = %tag.name(), "tag renamed");
        Ok(tag)
    }

    /// Deletes a tag. Tasks keep any stale link until it is unassigned.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::TagNotFound`] or an
    /// authorization failure.
    pub async fn delete_tag(&self, ctx: &RequestContext, tag_id: TagId) -> ProjectServiceResult<()> {
        let tag = require_tag(&*self.store, tag_id).await?;
        self.authorizer
            .authorize(ctx, tag.project_id(), RoleRequirement::AtLeastEditor)
            .await?;
        ctx.ensure_active()?;
        self.store.delete_tag(tag_id).await?;
        info!(%tag_id, project_id = %tag.project_id(), "tag deleted");
        Ok(())
    }

    /// Lists the project's tags by name.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::ProjectNotFound`] or
    /// [`super::ProjectServiceError::AccessDenied`] for non-members.
    pub async fn list_tags(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        page: PageRequest,
    ) -> ProjectServiceResult<Page<Tag>> {
        require_project(&*self.store, project_id).await?;
        self.authorizer
            .authorize(ctx, project_id, RoleRequirement::AnyRole)
            .await?;
        Ok(self.store.list_tags(project_id, page).await?)
    }
}
