//! Cascading deletion of projects and of everything a deleted user owns.

use super::{ProjectServiceResult, lookup::require_project};
use crate::context::RequestContext;
use crate::project::{
    domain::{Project, ProjectId, UserId},
    ports::{ProjectStore, TaskServiceClient},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of one project deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionReport {
    /// Deleted project.
    pub project_id: ProjectId,
    /// Tasks removed by the task service.
    pub tasks_deleted: u64,
    /// Membership rows removed.
    pub members_removed: u64,
    /// Tag rows removed.
    pub tags_removed: u64,
}

/// Outcome of cleaning up after a deleted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDeletionReport {
    /// Deleted user.
    pub user_id: UserId,
    /// One report per project the user owned.
    pub projects: Vec<DeletionReport>,
    /// Memberships the user held in projects owned by others.
    pub memberships_removed: u64,
}

/// Removes projects together with their memberships, tags and remote tasks.
///
/// Order per project: remote task cleanup, memberships, tags, project row.
/// Remote cleanup runs first so that a failure leaves the project visible
/// and the deletion retryable. Every step is idempotent, so retrying a
/// partially applied deletion converges.
#[derive(Clone)]
pub struct CascadingDeletionCoordinator<S, X>
where
    S: ProjectStore,
    X: TaskServiceClient,
{
    store: Arc<S>,
    tasks: Arc<X>,
}

impl<S, X> CascadingDeletionCoordinator<S, X>
where
    S: ProjectStore,
    X: TaskServiceClient,
{
    /// Creates a new deletion coordinator.
    #[must_use]
    pub const fn new(store: Arc<S>, tasks: Arc<X>) -> Self {
        Self { store, tasks }
    }

    /// Deletes a project and everything depending on it.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::ProjectNotFound`] when the
    /// project does not exist (including on a repeated call),
    /// [`super::ProjectServiceError::Remote`] when the task service fails or
    /// its breaker is open (no local rows are touched in that case), or
    /// repository failures from the local steps.
    pub async fn delete_project(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> ProjectServiceResult<DeletionReport> {
        ctx.ensure_active()?;
        let project = require_project(&*self.store, project_id).await?;
        self.cascade(ctx, &project).await
    }

    /// Deletes every project owned by `user_id`, then every membership the
    /// user still holds elsewhere.
    ///
    /// Stops at the first failing project; projects already deleted stay
    /// deleted and a retry picks up the remainder.
    ///
    /// # Errors
    ///
    /// Propagates the first failure from [`Self::delete_project`] or from
    /// the membership cleanup.
    pub async fn handle_user_deletion(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> ProjectServiceResult<UserDeletionReport> {
        ctx.ensure_active()?;
        let owned = self.store.find_projects_by_owner(user_id).await?;
        let mut projects = Vec::with_capacity(owned.len());
        for project in &owned {
            projects.push(self.delete_project(ctx, project.id()).await?);
        }

        ctx.ensure_active()?;
        let memberships_removed = self.store.delete_members_by_user(user_id).await?;
        info!(
            %user_id,
            projects_deleted = projects.len(),
            memberships_removed,
            "user cascade finished"
        );
        Ok(UserDeletionReport {
            user_id,
            projects,
            memberships_removed,
        })
    }

    async fn cascade(
        &self,
        ctx: &RequestContext,
        project: &Project,
    ) -> ProjectServiceResult<DeletionReport> {
        let project_id = project.id();

        ctx.ensure_active()?;
        let ack = self
            .tasks
            .delete_tasks_by_project(project_id)
            .await
            .inspect_err(|err| {
                warn!(%project_id, error = %err, "remote task cleanup failed, project kept");
            })?;

        ctx.ensure_active()?;
        let members_removed = self.store.delete_members_by_project(project_id).await?;

        ctx.ensure_active()?;
        let tags_removed = self.store.delete_tags_by_project(project_id).await?;

        ctx.ensure_active()?;
        self.store.delete_project(project_id).await?;

        info!(
            %project_id,
            name = %project.name(),
            tasks_deleted = ack.deleted,
            members_removed,
            tags_removed,
            "project deleted"
        );
        Ok(DeletionReport {
            project_id,
            tasks_deleted: ack.deleted,
            members_removed,
            tags_removed,
        })
    }
}
