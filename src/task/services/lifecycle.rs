//! Service layer for task creation, lookup and bulk removal.

use super::{TaskServiceError, TaskServiceResult, lookup::require_task};
use crate::context::RequestContext;
use crate::pagination::{Page, PageRequest};
use crate::project::domain::{ProjectId, Tag};
use crate::task::{
    domain::{Task, TaskId, TaskTitle},
    ports::{ProjectCatalog, TaskRepository},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
}

impl CreateTaskRequest {
    /// Creates a request for a task in `project_id`.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
        }
    }
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: ProjectCatalog,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    catalog: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: ProjectCatalog,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, catalog: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            repository,
            catalog,
            clock,
        }
    }

    /// Creates a task in an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an invalid title,
    /// [`TaskServiceError::ProjectNotFound`] when the catalog does not know
    /// the project, or catalog and repository failures.
    pub async fn create_task(
        &self,
        ctx: &RequestContext,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        ctx.ensure_active()?;
        let title = TaskTitle::new(request.title)?;
        let project_id = request.project_id;
        if !self.catalog.project_exists(project_id).await? {
            return Err(TaskServiceError::ProjectNotFound(project_id));
        }

        let task = Task::new(project_id, title, &*self.clock);
        ctx.ensure_active()?;
        self.repository.store_task(&task).await?;
        info!(task_id = %task.id(), %project_id, "task created");
        Ok(task)
    }

    /// Retrieves a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] or repository failures.
    pub async fn find_task(&self, ctx: &RequestContext, task_id: TaskId) -> TaskServiceResult<Task> {
        ctx.ensure_active()?;
        require_task(&*self.repository, task_id).await
    }

    /// Lists the project's tasks, oldest first.
    ///
    /// # Errors
    ///
    /// Returns repository failures.
    pub async fn list_tasks(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        page: PageRequest,
    ) -> TaskServiceResult<Page<Task>> {
        ctx.ensure_active()?;
        Ok(self
            .repository
            .list_tasks_by_project(project_id, page)
            .await?)
    }

    /// Resolves the tags linked to a task. Links to tags deleted since they
    /// were assigned are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`], catalog or repository
    /// failures.
    pub async fn tags_of(&self, ctx: &RequestContext, task_id: TaskId) -> TaskServiceResult<Vec<Tag>> {
        ctx.ensure_active()?;
        let task = require_task(&*self.repository, task_id).await?;
        if task.tag_ids().is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<_> = task.tag_ids().iter().copied().collect();
        ctx.ensure_active()?;
        Ok(self.catalog.tags_by_ids(&ids).await?)
    }

    /// Deletes every task in the project. Idempotent: a project without
    /// tasks yields zero.
    ///
    /// # Errors
    ///
    /// Returns cancellation or repository failures.
    pub async fn delete_by_project(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> TaskServiceResult<u64> {
        ctx.ensure_active()?;
        let deleted = self.repository.delete_tasks_for_project(project_id).await?;
        info!(%project_id, deleted, "project tasks deleted");
        Ok(deleted)
    }
}
