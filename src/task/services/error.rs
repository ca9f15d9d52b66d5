//! Service-level errors for the task context.

use crate::context::Cancelled;
use crate::error::ErrorKind;
use crate::project::domain::{ProjectId, TagId};
use crate::remote::RemoteError;
use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskRepositoryError,
};
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// The project catalog failed or is circuit-broken.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The request was cancelled.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The tag does not exist.
    #[error("tag not found: {0}")]
    TagNotFound(TagId),

    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
}

impl TaskServiceError {
    /// Classifies the error for clients.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(TaskRepositoryError::DuplicateTask(_)) => ErrorKind::Duplicate,
            Self::Repository(TaskRepositoryError::NotFound(_))
            | Self::TaskNotFound(_)
            | Self::TagNotFound(_)
            | Self::ProjectNotFound(_) => ErrorKind::NotFound,
            Self::Repository(TaskRepositoryError::Persistence(_))
            | Self::Remote(RemoteError::Call { .. }) => ErrorKind::Internal,
            Self::Remote(RemoteError::Unavailable { .. }) => ErrorKind::ServiceUnavailable,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
