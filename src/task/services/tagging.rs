//! Tag assignment with cross-project consistency checks.

use super::{TaskServiceResult, lookup};
use crate::context::RequestContext;
use crate::project::domain::TagId;
use crate::task::{
    domain::{Task, TaskId},
    ports::{ProjectCatalog, TaskRepository},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Links and unlinks tags on tasks.
///
/// Tags are resolved through the project catalog, so a link can only be
/// created when the tag exists and belongs to the task's project.
#[derive(Clone)]
pub struct TagAssignmentService<R, P, C>
where
    R: TaskRepository,
    P: ProjectCatalog,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    catalog: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> TagAssignmentService<R, P, C>
where
    R: TaskRepository,
    P: ProjectCatalog,
    C: Clock + Send + Sync,
{
    /// Creates a tag assignment service.
    #[must_use]
    pub const fn new(tasks: Arc<R>, catalog: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            catalog,
            clock,
        }
    }

    /// Links a tag to a task. Repeating the call is a no-op that issues no
    /// write.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::TaskNotFound`],
    /// [`super::TaskServiceError::TagNotFound`],
    /// [`crate::task::domain::TaskDomainError::TagProjectMismatch`] when the
    /// tag lives in another project, or catalog and repository failures.
    pub async fn assign(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
        tag_id: TagId,
    ) -> TaskServiceResult<Task> {
        ctx.ensure_active()?;
        let mut task = lookup::require_task(&*self.tasks, task_id).await?;
        ctx.ensure_active()?;
        let tag = lookup::require_tag(&*self.catalog, tag_id).await?;

        if !task.add_tag(&tag, &*self.clock)? {
            debug!(%task_id, %tag_id, "tag already assigned");
            return Ok(task);
        }

        ctx.ensure_active()?;
        self.tasks.save_task(&task).await?;
        info!(%task_id, %tag_id, project_id = %task.project_id(), "tag assigned");
        Ok(task)
    }

    /// Unlinks a tag from a task. The task is saved whether or not a link
    /// was present.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::TaskNotFound`],
    /// [`super::TaskServiceError::TagNotFound`], or catalog and repository failures.
    pub async fn unassign(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
        tag_id: TagId,
    ) -> TaskServiceResult<Task> {
        ctx.ensure_active()?;
        let mut task = lookup::require_task(&*self.tasks, task_id).await?;
        ctx.ensure_active()?;
        lookup::require_tag(&*self.catalog, tag_id).await?;

        let removed = task.remove_tag(tag_id, &*self.clock);
        ctx.ensure_active()?;
        self.tasks.save_task(&task).await?;
        if removed {
            info!(%task_id, %tag_id, "tag unassigned");
        } else {
            debug!(%task_id, %tag_id, "tag was not assigned");
        }
        Ok(task)
    }
}
