//! Role-hierarchy access gate.
//!
//! The gate answers "may this user act on this project" from the membership
//! store alone. It never consults the user directory: the ADMIN override is
//! a separate check composed by callers (see [`super::ProjectAuthorizer`]).

use super::{AccessDenied, ProjectServiceResult};
use crate::project::{
    domain::{ProjectId, ProjectRole, RoleRequirement, UserId},
    ports::MembershipRepository,
};
use std::sync::Arc;

/// Read-only gate over project memberships.
#[derive(Clone)]
pub struct AccessGate<M>
where
    M: MembershipRepository,
{
    memberships: Arc<M>,
}

impl<M> AccessGate<M>
where
    M: MembershipRepository,
{
    /// Creates a gate over the given membership store.
    #[must_use]
    pub const fn new(memberships: Arc<M>) -> Self {
        Self { memberships }
    }

    /// Returns the user's role on the project, or `None` for non-members.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::Repository`] when the lookup
    /// fails.
    pub async fn role_of(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectServiceResult<Option<ProjectRole>> {
        let member = self.memberships.find_member(project_id, user_id).await?;
        Ok(member.map(|found| found.role()))
    }

    /// Returns `true` when the user owns the project.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::Repository`] when the lookup
    /// fails.
    pub async fn is_owner(&self, project_id: ProjectId, user_id: UserId) -> ProjectServiceResult<bool> {
        self.satisfies(project_id, user_id, RoleRequirement::Owner)
            .await
    }

    /// Returns `true` for editors and the owner.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::Repository`] when the lookup
    /// fails.
    pub async fn is_at_least_editor(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectServiceResult<bool> {
        self.satisfies(project_id, user_id, RoleRequirement::AtLeastEditor)
            .await
    }

    /// Returns `true` for any member.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::Repository`] when the lookup
    /// fails.
    pub async fn has_any_role(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectServiceResult<bool> {
        self.satisfies(project_id, user_id, RoleRequirement::AnyRole)
            .await
    }

    /// Evaluates `requirement` without failing on denial.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::Repository`] when the lookup
    /// fails.
    pub async fn satisfies(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        requirement: RoleRequirement,
    ) -> ProjectServiceResult<bool> {
        let role = self.role_of(project_id, user_id).await?;
        Ok(role.is_some_and(|held| requirement.is_satisfied_by(held)))
    }

    /// Requires the owner role.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::AccessDenied`] when the user is
    /// not the owner.
    pub async fn require_owner(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectServiceResult<ProjectRole> {
        self.require(project_id, user_id, RoleRequirement::Owner)
            .await
    }

    /// Requires EDITOR or OWNER.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::AccessDenied`] for viewers and
    /// non-members.
    pub async fn require_at_least_editor(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectServiceResult<ProjectRole> {
        self.require(project_id, user_id, RoleRequirement::AtLeastEditor)
            .await
    }

    /// Requires any membership.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::AccessDenied`] for non-members.
    pub async fn require_any_role(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectServiceResult<ProjectRole> {
        self.require(project_id, user_id, RoleRequirement::AnyRole)
            .await
    }

    /// Requires `requirement`, returning the caller's role on success.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::AccessDenied`] carrying the
    /// required and current role when the requirement is not met.
    pub async fn require(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        requirement: RoleRequirement,
    ) -> ProjectServiceResult<ProjectRole> {
        let current = self.role_of(project_id, user_id).await?;
        match current {
            Some(role) if requirement.is_satisfied_by(role) => Ok(role),
            _ => Err(AccessDenied {
                project_id,
                user_id,
                required: requirement,
                current,
            }
            .into()),
        }
    }
}
