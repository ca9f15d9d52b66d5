//! Entity resolution shared by task services.

use super::{TaskServiceError, TaskServiceResult};
use crate::project::domain::{Tag, TagId};
use crate::task::{
    domain::{Task, TaskId},
    ports::{ProjectCatalog, TaskRepository},
};

/// Loads a task or fails with [`TaskServiceError::TaskNotFound`].
pub(super) async fn require_task<R>(tasks: &R, id: TaskId) -> TaskServiceResult<Task>
where
    R: TaskRepository + ?Sized,
{
    tasks
        .find_task(id)
        .await?
        .ok_or(TaskServiceError::TaskNotFound(id))
}

/// Resolves a tag through the catalog or fails with
/// [`TaskServiceError::TagNotFound`].
pub(super) async fn require_tag<P>(catalog: &P, id: TagId) -> TaskServiceResult<Tag>
where
    P: ProjectCatalog + ?Sized,
{
    catalog
        .tags_by_ids(&[id])
        .await?
        .into_iter()
        .find(|tag| tag.id() == id)
        .ok_or(TaskServiceError::TagNotFound(id))
}
