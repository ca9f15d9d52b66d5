//! Entity resolution shared by project services.

use super::{ProjectServiceError, ProjectServiceResult};
use crate::project::{
    domain::{Project, ProjectId, Tag, TagId},
    ports::{ProjectRepository, TagRepository},
};

/// Loads a project or fails with [`ProjectServiceError::ProjectNotFound`].
pub(super) async fn require_project<R>(repository: &R, id: ProjectId) -> ProjectServiceResult<Project>
where
    R: ProjectRepository + ?Sized,
{
    repository
        .find_project(id)
        .await?
        .ok_or(ProjectServiceError::ProjectNotFound(id))
}

/// Loads a tag or fails with [`ProjectServiceError::TagNotFound`].
pub(super) async fn require_tag<R>(repository: &R, id: TagId) -> ProjectServiceResult<Tag>
where
    R: TagRepository + ?Sized,
{
    repository
        .find_tag(id)
        .await?
        .ok_or(ProjectServiceError::TagNotFound(id))
}
