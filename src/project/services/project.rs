//! Project lifecycle service.

use super::{
    CascadingDeletionCoordinator, DeletionReport, OwnershipTransferEngine, ProjectAuthorizer,
    ProjectServiceError, ProjectServiceResult, UserDeletionReport, lookup::require_project,
};
use crate::context::RequestContext;
use crate::pagination::{Page, PageRequest};
use crate::project::{
    domain::{
        Project, ProjectDomainError, ProjectId, ProjectMember, ProjectName, RoleRequirement,
        UserId,
    },
    ports::{ProjectRepositoryError, ProjectStore, TaskServiceClient, UserDirectory},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Request to create a project owned by the acting user.
#[derive(Debug, Clone)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial project update. Absent fields stay unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectRequest {
    name: Option<String>,
    description: Option<String>,
    owner: Option<UserId>,
}

impl UpdateProjectRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the project.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Transfers ownership as part of the update.
    #[must_use]
    pub const fn with_owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.owner.is_none()
    }

    const fn requirement(&self) -> RoleRequirement {
        if self.owner.is_some() {
            RoleRequirement::Owner
        } else {
            RoleRequirement::AtLeastEditor
        }
    }
}

/// Project lifecycle: create, read, update, transfer and delete.
#[derive(Clone)]
pub struct ProjectService<S, U, X, C>
where
    S: ProjectStore,
    U: UserDirectory,
    X: TaskServiceClient,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    users: Arc<U>,
    clock: Arc<C>,
    authorizer: ProjectAuthorizer<S, U>,
    ownership: OwnershipTransferEngine<S, U, C>,
    deletion: CascadingDeletionCoordinator<S, X>,
}

impl<S, U, X, C> ProjectService<S, U, X, C>
where
    S: ProjectStore,
    U: UserDirectory,
    X: TaskServiceClient,
    C: Clock + Send + Sync,
{
    /// Wires the service and its collaborators over shared adapters.
    #[must_use]
    pub fn new(store: Arc<S>, users: Arc<U>, tasks: Arc<X>, clock: Arc<C>) -> Self {
        Self {
            authorizer: ProjectAuthorizer::new(Arc::clone(&store), Arc::clone(&users)),
            ownership: OwnershipTransferEngine::new(
                Arc::clone(&store),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            deletion: CascadingDeletionCoordinator::new(Arc::clone(&store), tasks),
            store,
            users,
            clock,
        }
    }

    /// Returns the authorizer used by this service.
    #[must_use]
    pub const fn authorizer(&self) -> &ProjectAuthorizer<S, U> {
        &self.authorizer
    }

    /// Creates a project owned by the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::MissingActor`],
    /// [`ProjectServiceError::UserNotFound`] when the actor is unknown,
    /// [`ProjectServiceError::Domain`] for an invalid name, or
    /// [`ProjectRepositoryError::DuplicateProjectName`] on a name clash.
    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let owner_id = ctx.acting_user().ok_or(ProjectServiceError::MissingActor)?;
        ctx.ensure_active()?;
        let name = ProjectName::new(request.name)?;
        if !self.users.user_exists(owner_id).await? {
            return Err(ProjectServiceError::UserNotFound(owner_id));
        }
        if self.store.find_project_by_name(&name).await?.is_some() {
            return Err(ProjectRepositoryError::DuplicateProjectName(name).into());
        }

        let project = Project::new(name, request.description, owner_id, &*self.clock);
        let owner = ProjectMember::founding_owner(project.id(), owner_id, &*self.clock);
        ctx.ensure_active()?;
        self.store.store_project(&project, &owner).await?;
        info!(project_id = %project.id(), %owner_id, name = %project.name(), "project created");
        Ok(project)
    }

    /// Returns a project the caller can see.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] or
    /// [`ProjectServiceError::AccessDenied`].
    pub async fn get_project(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> ProjectServiceResult<Project> {
        let project = require_project(&*self.store, project_id).await?;
        self.authorizer
            .authorize(ctx, project_id, RoleRequirement::AnyRole)
            .await?;
        Ok(project)
    }

    /// Lists the projects the acting user belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::MissingActor`] or repository failures.
    pub async fn list_projects(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> ProjectServiceResult<Page<Project>> {
        let user_id = ctx.acting_user().ok_or(ProjectServiceError::MissingActor)?;
        ctx.ensure_active()?;
        Ok(self.store.list_projects_for_member(user_id, page).await?)
    }

    /// Applies a partial update. Changing the owner requires the OWNER role;
    /// the transfer and any name or description edits are then written in
    /// one atomic step, after the new owner is confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyUpdate`] for an empty request,
    /// [`ProjectServiceError::ProjectNotFound`],
    /// [`ProjectServiceError::AccessDenied`],
    /// [`ProjectRepositoryError::DuplicateProjectName`] on a rename clash,
    /// or ownership transfer failures.
    pub async fn update_project(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        if request.is_empty() {
            return Err(ProjectDomainError::EmptyUpdate.into());
        }
        let mut project = require_project(&*self.store, project_id).await?;
        self.authorizer
            .authorize(ctx, project_id, request.requirement())
            .await?;

        let mut changed = false;
        if let Some(raw_name) = request.name {
            let name = ProjectName::new(raw_name)?;
            if name != *project.name() {
                let clash = self.store.find_project_by_name(&name).await?;
                if clash.is_some_and(|other| other.id() != project_id) {
                    return Err(ProjectRepositoryError::DuplicateProjectName(name).into());
                }
                project.rename(name, &*self.clock);
                changed = true;
            }
        }
        if let Some(description) = request.description {
            if project.description() != Some(description.as_str()) {
                project.set_description(Some(description), &*self.clock);
                changed = true;
            }
        }

        match (request.owner, changed) {
            (Some(new_owner), true) => {
                self.ownership
                    .apply_with_details(ctx, project, new_owner)
                    .await
            }
            (Some(new_owner), false) => self.ownership.apply(ctx, project, new_owner).await,
            (None, true) => {
                ctx.ensure_active()?;
                self.store.update_project(&project).await?;
                info!(%project_id, "project updated");
                Ok(project)
            }
            (None, false) => Ok(project),
        }
    }

    /// Transfers ownership to another user. Only the current owner (or an
    /// administrator) may do this.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`],
    /// [`ProjectServiceError::AccessDenied`],
    /// [`ProjectServiceError::UserNotFound`] or persistence failures.
    pub async fn transfer_ownership(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        new_owner: UserId,
    ) -> ProjectServiceResult<Project> {
        let project = require_project(&*self.store, project_id).await?;
        self.authorizer
            .authorize(ctx, project_id, RoleRequirement::Owner)
            .await?;
        self.ownership.apply(ctx, project, new_owner).await
    }

    /// Deletes a project together with its members, tags and tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`],
    /// [`ProjectServiceError::AccessDenied`], or the coordinator's failures;
    /// an open task-service breaker surfaces as
    /// [`crate::error::ErrorKind::ServiceUnavailable`].
    pub async fn delete_project(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> ProjectServiceResult<DeletionReport> {
        require_project(&*self.store, project_id).await?;
        self.authorizer
            .authorize(ctx, project_id, RoleRequirement::Owner)
            .await?;
        self.deletion.delete_project(ctx, project_id).await
    }

    /// Cleans up after a user was deleted upstream. Service-to-service
    /// entry point; not gated.
    ///
    /// # Errors
    ///
    /// See [`CascadingDeletionCoordinator::handle_user_deletion`].
    pub async fn handle_user_deletion(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> ProjectServiceResult<UserDeletionReport> {
        self.deletion.handle_user_deletion(ctx, user_id).await
    }
}
