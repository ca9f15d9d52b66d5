//! Project membership entity.

use super::{ProjectId, ProjectRole, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Membership of a user on a project, identified by `(project_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    project_id: ProjectId,
    user_id: UserId,
    role: ProjectRole,
    joined_at: DateTime<Utc>,
}

impl ProjectMember {
    /// Creates a membership that joins now.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
        clock: &impl Clock,
    ) -> Self {
        Self {
            project_id,
            user_id,
            role,
            joined_at: clock.utc(),
        }
    }

    /// Creates the founding OWNER membership for a project.
    #[must_use]
    pub fn founding_owner(project_id: ProjectId, user_id: UserId, clock: &impl Clock) -> Self {
        Self::new(project_id, user_id, ProjectRole::Owner, clock)
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the member's role.
    #[must_use]
    pub const fn role(&self) -> ProjectRole {
        self.role
    }

    /// Returns when the member joined.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Returns `true` for the OWNER membership.
    #[must_use]
    pub const fn is_owner(&self) -> bool {
        matches!(self.role, ProjectRole::Owner)
    }

    /// Changes the member's role.
    pub const fn set_role(&mut self, role: ProjectRole) {
        self.role = role;
    }
}
