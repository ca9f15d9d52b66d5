//! Error types for task domain validation.

use super::TaskId;
use crate::project::domain::{ProjectId, TagId};
use thiserror::Error;

/// Errors returned while constructing or changing tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task title exceeds the maximum length.
    #[error("task title is too long: '{0}'")]
    TaskTitleTooLong(String),

    /// A tag from another project was linked to the task.
    #[error("tag does not belong to task's project (task {task_id} in {task_project}, tag {tag_id} in {tag_project})")]
    TagProjectMismatch {
        /// Task being tagged.
        task_id: TaskId,
        /// Project the task belongs to.
        task_project: ProjectId,
        /// Offending tag.
        tag_id: TagId,
        /// Project the tag belongs to.
        tag_project: ProjectId,
    },
}
