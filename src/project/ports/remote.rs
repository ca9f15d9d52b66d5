//! Ports for sibling services consumed by the project service.

use crate::project::domain::{ProjectId, UserAccount, UserId};
use crate::remote::RemoteResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identity and role queries against the user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns whether the user exists.
    async fn user_exists(&self, user_id: UserId) -> RemoteResult<bool>;

    /// Returns whether the user holds the account-level ADMIN role.
    async fn is_admin(&self, user_id: UserId) -> RemoteResult<bool>;

    /// Returns the account snapshot, or `None` for unknown users.
    async fn find_user(&self, user_id: UserId) -> RemoteResult<Option<UserAccount>>;
}

/// Acknowledgement returned by the task service after a cascading delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDeletionAck {
    /// Project whose tasks were deleted.
    pub project_id: ProjectId,
    /// Number of tasks removed.
    pub deleted: u64,
}

/// Commands sent to the task-owning service.
#[async_trait]
pub trait TaskServiceClient: Send + Sync {
    /// Deletes every task belonging to the project. Deleting the tasks of a
    /// project that has none succeeds with `deleted == 0`.
    async fn delete_tasks_by_project(&self, project_id: ProjectId)
    -> RemoteResult<TaskDeletionAck>;
}
