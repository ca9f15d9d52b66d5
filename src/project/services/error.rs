//! Service-level errors for the project context and their client-facing
//! classification.

use crate::context::Cancelled;
use crate::error::ErrorKind;
use crate::project::{
    domain::{ProjectDomainError, ProjectId, ProjectRole, RoleRequirement, TagId, UserId},
    ports::ProjectRepositoryError,
};
use crate::remote::RemoteError;
use std::fmt;
use thiserror::Error;

/// Denial produced by the role gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDenied {
    /// Project the caller tried to act on.
    pub project_id: ProjectId,
    /// Caller identity.
    pub user_id: UserId,
    /// Requirement that was not met.
    pub required: RoleRequirement,
    /// Caller's role, or `None` when not a member.
    pub current: Option<ProjectRole>,
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current {
            Some(role) => write!(
                f,
                "access denied on project {}: required {}, current {role}",
                self.project_id, self.required
            ),
            None => write!(
                f,
                "access denied on project {}: required {}, current none (not a member)",
                self.project_id, self.required
            ),
        }
    }
}

impl std::error::Error for AccessDenied {}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),

    /// A remote dependency failed or is circuit-broken.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The role gate rejected the caller.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// The request was cancelled.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    /// A user-facing operation was invoked without an acting user.
    #[error("operation requires an authenticated user")]
    MissingActor,

    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The user is unknown to the user directory.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The user is not a member of the project.
    #[error("user {user_id} is not a member of project {project_id}")]
    MemberNotFound {
        /// Project identifier.
        project_id: ProjectId,
        /// User identifier.
        user_id: UserId,
    },

    /// The tag does not exist in the project.
    #[error("tag not found: {0}")]
    TagNotFound(TagId),
}

impl ProjectServiceError {
    /// Classifies the error for clients.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(err) => repository_kind(err),
            Self::Remote(RemoteError::Unavailable { .. }) => ErrorKind::ServiceUnavailable,
            Self::Remote(RemoteError::Call { .. }) => ErrorKind::Internal,
            Self::AccessDenied(_) | Self::MissingActor => ErrorKind::AccessDenied,
            Self::Cancelled(_) => ErrorKind::Cancelled,
            Self::ProjectNotFound(_)
            | Self::UserNotFound(_)
            | Self::MemberNotFound { .. }
            | Self::TagNotFound(_) => ErrorKind::NotFound,
        }
    }
}

const fn repository_kind(err: &ProjectRepositoryError) -> ErrorKind {
    match err {
        ProjectRepositoryError::DuplicateProjectName(_)
        | ProjectRepositoryError::DuplicateTagName { .. }
        | ProjectRepositoryError::DuplicateMember { .. }
        | ProjectRepositoryError::OwnershipConflict(_) => ErrorKind::Duplicate,
        ProjectRepositoryError::ProjectNotFound(_)
        | ProjectRepositoryError::MemberNotFound { .. }
        | ProjectRepositoryError::TagNotFound(_) => ErrorKind::NotFound,
        ProjectRepositoryError::OwnerMembershipLocked { .. } => ErrorKind::Validation,
        ProjectRepositoryError::Persistence(_) => ErrorKind::Internal,
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;
