//! Ownership transfer engine.

use super::{ProjectServiceError, ProjectServiceResult, lookup::require_project};
use crate::context::RequestContext;
use crate::project::{
    domain::{OwnershipChange, Project, ProjectId, UserId},
    ports::{ProjectStore, UserDirectory},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Moves the OWNER role between members while keeping exactly one owner.
///
/// The transition is:
/// 1. Resolve the project.
/// 2. Confirm the new owner exists in the user directory.
/// 3. Short-circuit when the new owner already owns the project.
/// 4. Point the project at the new owner, demote the previous owner to
///    EDITOR and promote (or create) the new owner's membership, all in one
///    atomic repository call.
///
/// The engine does not authorize; callers run the role gate first.
#[derive(Clone)]
pub struct OwnershipTransferEngine<S, U, C>
where
    S: ProjectStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<S, U, C> OwnershipTransferEngine<S, U, C>
where
    S: ProjectStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new ownership transfer engine.
    #[must_use]
    pub const fn new(store: Arc<S>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            store,
            users,
            clock,
        }
    }

    /// Transfers ownership of `project_id` to `new_owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`],
    /// [`ProjectServiceError::UserNotFound`], remote or repository failures,
    /// or [`ProjectServiceError::Domain`] when storage holds no OWNER
    /// membership for the current owner.
    pub async fn transfer(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        new_owner: UserId,
    ) -> ProjectServiceResult<Project> {
        ctx.ensure_active()?;
        let project = require_project(&*self.store, project_id).await?;
        self.apply(ctx, project, new_owner).await
    }

    /// Applies the transfer to an already-resolved project.
    ///
    /// # Errors
    ///
    /// See [`Self::transfer`].
    pub async fn apply(
        &self,
        ctx: &RequestContext,
        project: Project,
        new_owner: UserId,
    ) -> ProjectServiceResult<Project> {
        self.commit(ctx, project, new_owner, false).await
    }

    /// Applies the transfer together with name and description edits
    /// already made to `project`. Nothing is written unless the new owner
    /// exists; when ownership does not move, only the edits are saved.
    ///
    /// # Errors
    ///
    /// See [`Self::transfer`]; a colliding rename returns
    /// [`crate::project::ports::ProjectRepositoryError::DuplicateProjectName`].
    pub async fn apply_with_details(
        &self,
        ctx: &RequestContext,
        project: Project,
        new_owner: UserId,
    ) -> ProjectServiceResult<Project> {
        self.commit(ctx, project, new_owner, true).await
    }

    async fn commit(
        &self,
        ctx: &RequestContext,
        project: Project,
        new_owner: UserId,
        with_details: bool,
    ) -> ProjectServiceResult<Project> {
        ctx.ensure_active()?;
        if !self.users.user_exists(new_owner).await? {
            return Err(ProjectServiceError::UserNotFound(new_owner));
        }

        if project.is_owned_by(new_owner) {
            if with_details {
                ctx.ensure_active()?;
                self.store.update_project(&project).await?;
                info!(project_id = %project.id(), "project updated");
            } else {
                debug!(project_id = %project.id(), %new_owner, "ownership unchanged");
            }
            return Ok(project);
        }

        ctx.ensure_active()?;
        let previous_owner = project.owner_id();
        let previous = self.store.find_member(project.id(), previous_owner).await?;
        let existing = self.store.find_member(project.id(), new_owner).await?;
        let Some(planned) =
            OwnershipChange::plan(&project, previous, existing, new_owner, &*self.clock)?
        else {
            return Ok(project);
        };
        let change = if with_details {
            planned.with_details()
        } else {
            planned
        };

        ctx.ensure_active()?;
        self.store.apply_ownership_change(&change).await?;
        info!(
            project_id = %change.project().id(),
            %previous_owner,
            %new_owner,
            created_membership = change.creates_membership(),
            details_updated = change.carries_details(),
            "project ownership transferred"
        );
        Ok(change.into_project())
    }
}
