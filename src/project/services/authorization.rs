//! Composition of the ADMIN override with the role gate.

use super::{AccessGate, ProjectServiceError, ProjectServiceResult};
use crate::context::RequestContext;
use crate::project::{
    domain::{ProjectId, ProjectRole, RoleRequirement, UserId},
    ports::{MembershipRepository, UserDirectory},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// How a caller was admitted to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// Account-level administrator; project roles were not consulted.
    Admin,
    /// Project member holding the given role.
    Member(ProjectRole),
}

/// Authorizes end-user requests against a project.
///
/// The admin lookup and the gate are two independent checks. A failed admin
/// lookup (for example an open user-service breaker) is logged and the
/// request falls through to the gate instead of being denied outright.
#[derive(Clone)]
pub struct ProjectAuthorizer<M, U>
where
    M: MembershipRepository,
    U: UserDirectory,
{
    gate: AccessGate<M>,
    users: Arc<U>,
}

impl<M, U> ProjectAuthorizer<M, U>
where
    M: MembershipRepository,
    U: UserDirectory,
{
    /// Creates an authorizer.
    #[must_use]
    pub const fn new(memberships: Arc<M>, users: Arc<U>) -> Self {
        Self {
            gate: AccessGate::new(memberships),
            users,
        }
    }

    /// Returns the underlying role gate.
    #[must_use]
    pub const fn gate(&self) -> &AccessGate<M> {
        &self.gate
    }

    /// Returns whether the user is an administrator, treating lookup
    /// failures as "not an administrator".
    pub async fn is_admin(&self, user_id: UserId) -> bool {
        match self.users.is_admin(user_id).await {
            Ok(is_admin) => is_admin,
            Err(err) => {
                warn!(%user_id, error = %err, "admin lookup failed, falling back to project roles");
                false
            }
        }
    }

    /// Admits the acting user if they are an administrator or satisfy
    /// `requirement` on the project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::MissingActor`] for contexts without a
    /// user, [`ProjectServiceError::Cancelled`] when the request was
    /// abandoned, or [`ProjectServiceError::AccessDenied`] from the gate.
    pub async fn authorize(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        requirement: RoleRequirement,
    ) -> ProjectServiceResult<Authorization> {
        let user_id = ctx.acting_user().ok_or(ProjectServiceError::MissingActor)?;
        ctx.ensure_active()?;
        if self.is_admin(user_id).await {
            debug!(%user_id, %project_id, "admin override");
            return Ok(Authorization::Admin);
        }
        ctx.ensure_active()?;
        let role = self.gate.require(project_id, user_id, requirement).await?;
        Ok(Authorization::Member(role))
    }
}
