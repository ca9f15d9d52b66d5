//! In-process task service client backed directly by the task lifecycle
//! service.

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::project::{
    domain::ProjectId,
    ports::{TaskDeletionAck, TaskServiceClient},
};
use crate::remote::{RemoteError, RemoteResult, TASK_SERVICE};
use crate::task::{
    ports::{ProjectCatalog, TaskRepository},
    services::TaskLifecycleService,
};
use mockable::Clock;

/// [`TaskServiceClient`] calling a co-located [`TaskLifecycleService`].
#[derive(Clone)]
pub struct LoopbackTaskService<R, P, C>
where
    R: TaskRepository,
    P: ProjectCatalog,
    C: Clock + Send + Sync,
{
    service: TaskLifecycleService<R, P, C>,
}

impl<R, P, C> LoopbackTaskService<R, P, C>
where
    R: TaskRepository,
    P: ProjectCatalog,
    C: Clock + Send + Sync,
{
    /// Wraps the task lifecycle service.
    #[must_use]
    pub const fn new(service: TaskLifecycleService<R, P, C>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R, P, C> TaskServiceClient for LoopbackTaskService<R, P, C>
where
    R: TaskRepository,
    P: ProjectCatalog,
    C: Clock + Send + Sync,
{
    async fn delete_tasks_by_project(
        &self,
        project_id: ProjectId,
    ) -> RemoteResult<TaskDeletionAck> {
        let deleted = self
            .service
            .delete_by_project(&RequestContext::internal(), project_id)
            .await
            .map_err(|err| RemoteError::call(TASK_SERVICE, err))?;
        Ok(TaskDeletionAck {
            project_id,
            deleted,
        })
    }
}
