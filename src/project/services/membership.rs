//! Membership management service.

use super::{
    ProjectAuthorizer, ProjectServiceError, ProjectServiceResult, lookup::require_project,
};
use crate::context::RequestContext;
use crate::pagination::{Page, PageRequest};
use crate::project::{
    domain::{ProjectDomainError, ProjectId, ProjectMember, ProjectRole, RoleRequirement, UserId},
    ports::{ProjectStore, UserDirectory},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Request to add a user to a project.
#[derive(Debug, Clone, Copy)]
pub struct AddMemberRequest {
    user_id: UserId,
    role: Option<ProjectRole>,
}

impl AddMemberRequest {
    /// Adds `user_id` with the default role.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            role: None,
        }
    }

    /// Sets an explicit role.
    #[must_use]
    pub const fn with_role(mut self, role: ProjectRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Returns the role to grant, falling back to [`ProjectRole::DEFAULT`].
    #[must_use]
    pub fn role(&self) -> ProjectRole {
        self.role.unwrap_or(ProjectRole::DEFAULT)
    }
}

/// Adds, updates, removes and lists project members.
///
/// OWNER is never granted here: ownership moves only by transfer, which
/// keeps exactly one owner per project.
#[derive(Clone)]
pub struct MembershipService<S, U, C>
where
    S: ProjectStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    users: Arc<U>,
    clock: Arc<C>,
    authorizer: ProjectAuthorizer<S, U>,
}

impl<S, U, C> MembershipService<S, U, C>
where
    S: ProjectStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a membership service.
    #[must_use]
    pub fn new(store: Arc<S>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            authorizer: ProjectAuthorizer::new(Arc::clone(&store), Arc::clone(&users)),
            store,
            users,
            clock,
        }
    }

    /// Adds a member to the project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`],
    /// [`ProjectServiceError::AccessDenied`] unless the caller owns the
    /// project, [`ProjectDomainError::OwnerRoleNotAssignable`],
    /// [`ProjectServiceError::UserNotFound`], or a duplicate-member
    /// repository error.
    pub async fn add_member(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        request: AddMemberRequest,
    ) -> ProjectServiceResult<ProjectMember> {
        require_project(&*self.store, project_id).await?;
        self.authorizer
            .authorize(ctx, project_id, RoleRequirement::Owner)
            .await?;

        let role = request.role();
        if role == ProjectRole::Owner {
            return Err(ProjectDomainError::OwnerRoleNotAssignable.into());
        }
        let user_id = request.user_id;
        if !self.users.user_exists(user_id).await? {
            return Err(ProjectServiceError::UserNotFound(user_id));
        }

        let member = ProjectMember::new(project_id, user_id, role, &*self.clock);
        ctx.ensure_active()?;
        self.store.add_member(&member).await?;
        info!(%project_id, %user_id, %role, "member added");
        Ok(member)
    }

    /// Changes a member's role.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::OwnerRoleNotAssignable`] when asked to
    /// grant OWNER, [`ProjectDomainError::OwnerMembershipLocked`] when the
    /// target is the owner, [`ProjectServiceError::MemberNotFound`], or the
    /// usual lookup and authorization failures. A membership that became
    /// OWNER after the check is refused by the store with
    /// [`crate::project::ports::ProjectRepositoryError::OwnerMembershipLocked`].
    pub async fn update_member_role(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
    ) -> ProjectServiceResult<ProjectMember> {
        let project = require_project(&*self.store, project_id).await?;
        self.authorizer
            .authorize(ctx, project_id, RoleRequirement::Owner)
            .await?;

        if role == ProjectRole::Owner {
            return Err(ProjectDomainError::OwnerRoleNotAssignable.into());
        }
        if project.is_owned_by(user_id) {
            return Err(ProjectDomainError::OwnerMembershipLocked(user_id).into());
        }
        let mut member = self
            .store
            .find_member(project_id, user_id)
            .await?
            .ok_or(ProjectServiceError::MemberNotFound {
                project_id,
                user_id,
            })?;
        if member.role() == role {
            return Ok(member);
        }

        let previous = member.role();
        member.set_role(role);
        ctx.ensure_active()?;
        self.store.update_member(&member).await?;
        info!(%project_id, %user_id, %previous, %role, "member role changed");
        Ok(member)
    }

    /// Removes a member.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::OwnerMembershipLocked`] for the owner,
    /// a member-not-found repository error, or the usual lookup and
    /// authorization failures. The store refuses to remove any OWNER row,
    /// including one promoted by a concurrent transfer.
    pub async fn remove_member(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectServiceResult<()> {
        let project = require_project(&*self.store, project_id).await?;
        self.authorizer
            .authorize(ctx, project_id, RoleRequirement::Owner)
            .await?;
        if project.is_owned_by(user_id) {
            return Err(ProjectDomainError::OwnerMembershipLocked(user_id).into());
        }
        ctx.ensure_active()?;
        self.store.remove_member(project_id, user_id).await?;
        info!(%project_id, %user_id, "member removed");
        Ok(())
    }

    /// Lists the project's members, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] or
    /// [`ProjectServiceError::AccessDenied`] for non-members.
    pub async fn list_members(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        page: PageRequest,
    ) -> ProjectServiceResult<Page<ProjectMember>> {
        require_project(&*self.store, project_id).await?;
        self.authorizer
            .authorize(ctx, project_id, RoleRequirement::AnyRole)
            .await?;
        Ok(self.store.list_members(project_id, page).await?)
    }

    /// Returns `user_id`'s role on the project, or `None` for non-members.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] or
    /// [`ProjectServiceError::AccessDenied`] for non-members.
    pub async fn member_role(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectServiceResult<Option<ProjectRole>> {
        require_project(&*self.store, project_id).await?;
        self.authorizer
            .authorize(ctx, project_id, RoleRequirement::AnyRole)
            .await?;
        self.authorizer.gate().role_of(project_id, user_id).await
    }
}
