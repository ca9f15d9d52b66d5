//! Ownership transfer state transition.
//!
//! A transfer touches three records: the project's owner reference, the
//! previous owner's membership (OWNER → EDITOR) and the new owner's
//! membership (promoted in place, or created as OWNER). [`OwnershipChange`]
//! captures all three so a repository can persist them as one atomic step;
//! before and after that step exactly one membership holds OWNER. A change
//! may also carry name and description edits made by the same update.

use super::{Project, ProjectDomainError, ProjectMember, ProjectRole, UserId};
use mockable::Clock;

/// Planned ownership transfer, ready to be persisted atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipChange {
    project: Project,
    demoted: ProjectMember,
    promoted: ProjectMember,
    creates_membership: bool,
    carries_details: bool,
}

impl OwnershipChange {
    /// Plans the transfer of `project` to `new_owner`.
    ///
    /// `previous_owner` is the current owner's membership and
    /// `new_owner_membership` the new owner's existing membership, if any.
    /// Returns `Ok(None)` when `new_owner` already owns the project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::OwnerMembershipMissing`] when
    /// `previous_owner` is absent or is not the OWNER membership of the
    /// project's current owner.
    pub fn plan(
        project: &Project,
        previous_owner: Option<ProjectMember>,
        new_owner_membership: Option<ProjectMember>,
        new_owner: UserId,
        clock: &impl Clock,
    ) -> Result<Option<Self>, ProjectDomainError> {
        if project.is_owned_by(new_owner) {
            return Ok(None);
        }

        let mut demoted = previous_owner
            .filter(|member| {
                member.project_id() == project.id()
                    && member.user_id() == project.owner_id()
                    && member.is_owner()
            })
            .ok_or(ProjectDomainError::OwnerMembershipMissing(project.id()))?;
        demoted.set_role(ProjectRole::DEMOTED_OWNER);

        let existing = new_owner_membership
            .filter(|member| member.project_id() == project.id() && member.user_id() == new_owner);
        let creates_membership = existing.is_none();
        let promoted = match existing {
            Some(mut member) => {
                member.set_role(ProjectRole::Owner);
                member
            }
            None => ProjectMember::new(project.id(), new_owner, ProjectRole::Owner, clock),
        };

        let mut transferred = project.clone();
        transferred.assign_owner(new_owner, clock);

        Ok(Some(Self {
            project: transferred,
            demoted,
            promoted,
            creates_membership,
            carries_details: false,
        }))
    }

    /// Marks the planned project's name and description as edits to be
    /// written together with the transfer.
    #[must_use]
    pub const fn with_details(mut self) -> Self {
        self.carries_details = true;
        self
    }

    /// Returns the owner the plan was made against.
    #[must_use]
    pub const fn previous_owner(&self) -> UserId {
        self.demoted.user_id()
    }

    /// Returns the project with its owner reference updated.
    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.project
    }

    /// Returns the previous owner's membership, now EDITOR.
    #[must_use]
    pub const fn demoted(&self) -> &ProjectMember {
        &self.demoted
    }

    /// Returns the new owner's membership, now OWNER.
    #[must_use]
    pub const fn promoted(&self) -> &ProjectMember {
        &self.promoted
    }

    /// Returns `true` when the new owner was not yet a member.
    #[must_use]
    pub const fn creates_membership(&self) -> bool {
        self.creates_membership
    }

    /// Returns `true` when name and description edits ride along.
    #[must_use]
    pub const fn carries_details(&self) -> bool {
        self.carries_details
    }

    /// Consumes the change, returning the updated project.
    #[must_use]
    pub fn into_project(self) -> Project {
        self.project
    }
}
