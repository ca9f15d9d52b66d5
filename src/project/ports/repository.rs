//! Repository ports for projects, memberships and tags.
//!
//! Method names are distinct across the three traits so a single store can
//! implement all of them without call-site ambiguity.

use crate::pagination::{Page, PageRequest};
use crate::project::domain::{
    OwnershipChange, Project, ProjectId, ProjectMember, ProjectName, Tag, TagId, TagName, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project together with its founding OWNER membership.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProjectName`] when the name
    /// is taken.
    async fn store_project(
        &self,
        project: &Project,
        owner: &ProjectMember,
    ) -> ProjectRepositoryResult<()>;

    /// Persists name, description and timestamp changes.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ProjectNotFound`] when the project
    /// does not exist or [`ProjectRepositoryError::DuplicateProjectName`]
    /// when a rename collides.
    async fn update_project(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier.
    async fn find_project(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Finds a project by exact (case-sensitive) name.
    async fn find_project_by_name(
        &self,
        name: &ProjectName,
    ) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns every project owned by `owner`.
    async fn find_projects_by_owner(&self, owner: UserId) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns a page of the projects `user_id` is a member of, ordered by
    /// name.
    async fn list_projects_for_member(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> ProjectRepositoryResult<Page<Project>>;

    /// Applies an ownership transfer atomically: updates the project's owner
    /// reference, writes the demoted membership and writes (or inserts) the
    /// promoted one. Name and description are written only when the change
    /// carries detail edits.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ProjectNotFound`] when the project
    /// no longer exists, [`ProjectRepositoryError::OwnershipConflict`] when
    /// stored ownership no longer matches the plan, or
    /// [`ProjectRepositoryError::DuplicateProjectName`] when a carried rename
    /// collides.
    async fn apply_ownership_change(&self, change: &OwnershipChange)
    -> ProjectRepositoryResult<()>;

    /// Deletes the project row.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    async fn delete_project(&self, id: ProjectId) -> ProjectRepositoryResult<()>;
}

/// Membership persistence contract.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Finds the membership of `user_id` on `project_id`.
    async fn find_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<Option<ProjectMember>>;

    /// Adds a membership.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateMember`] when the user is
    /// already a member.
    async fn add_member(&self, member: &ProjectMember) -> ProjectRepositoryResult<()>;

    /// Persists a role change. OWNER rows are only changed through
    /// [`ProjectRepository::apply_ownership_change`].
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::MemberNotFound`] when the membership
    /// does not exist or [`ProjectRepositoryError::OwnerMembershipLocked`]
    /// when the stored or new role is OWNER.
    async fn update_member(&self, member: &ProjectMember) -> ProjectRepositoryResult<()>;

    /// Removes one membership.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::MemberNotFound`] when the membership
    /// does not exist or [`ProjectRepositoryError::OwnerMembershipLocked`]
    /// when it holds OWNER.
    async fn remove_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<()>;

    /// Returns a page of the project's memberships, oldest first.
    async fn list_members(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> ProjectRepositoryResult<Page<ProjectMember>>;

    /// Deletes every membership on the project, returning how many went.
    async fn delete_members_by_project(&self, project_id: ProjectId)
    -> ProjectRepositoryResult<u64>;

    /// Deletes every membership held by the user, returning how many went.
    async fn delete_members_by_user(&self, user_id: UserId) -> ProjectRepositoryResult<u64>;
}

/// Tag persistence contract.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Stores a new tag.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateTagName`] when the project
    /// already has a tag with the same case-insensitive name.
    async fn store_tag(&self, tag: &Tag) -> ProjectRepositoryResult<()>;

    /// Persists a renamed tag.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::TagNotFound`] or
    /// [`ProjectRepositoryError::DuplicateTagName`].
    async fn update_tag(&self, tag: &Tag) -> ProjectRepositoryResult<()>;

    /// Finds a tag by identifier.
    async fn find_tag(&self, id: TagId) -> ProjectRepositoryResult<Option<Tag>>;

    /// Returns the tags matching `ids`; unknown identifiers are skipped.
    async fn find_tags(&self, ids: &[TagId]) -> ProjectRepositoryResult<Vec<Tag>>;

    /// Returns a page of the project's tags, ordered by name.
    async fn list_tags(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> ProjectRepositoryResult<Page<Tag>>;

    /// Deletes one tag.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::TagNotFound`] when the tag does not
    /// exist.
    async fn delete_tag(&self, id: TagId) -> ProjectRepositoryResult<()>;

    /// Deletes every tag on the project, returning how many went.
    async fn delete_tags_by_project(&self, project_id: ProjectId) -> ProjectRepositoryResult<u64>;
}

/// Storage backing the project service: projects, memberships and tags.
pub trait ProjectStore: ProjectRepository + MembershipRepository + TagRepository {}

impl<T> ProjectStore for T where T: ProjectRepository + MembershipRepository + TagRepository {}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// Another project already uses the name.
    #[error("duplicate project name: {0}")]
    DuplicateProjectName(ProjectName),

    /// The project already has a tag with this name.
    #[error("duplicate tag name in project {project_id}: {name}")]
    DuplicateTagName {
        /// Project holding the existing tag.
        project_id: ProjectId,
        /// Conflicting name.
        name: TagName,
    },

    /// The user is already a member of the project.
    #[error("user {user_id} is already a member of project {project_id}")]
    DuplicateMember {
        /// Project identifier.
        project_id: ProjectId,
        /// User identifier.
        user_id: UserId,
    },

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The membership was not found.
    #[error("user {user_id} is not a member of project {project_id}")]
    MemberNotFound {
        /// Project identifier.
        project_id: ProjectId,
        /// User identifier.
        user_id: UserId,
    },

    /// The tag was not found.
    #[error("tag not found: {0}")]
    TagNotFound(TagId),

    /// The membership holds OWNER and cannot be changed or removed directly.
    #[error("user {user_id} owns project {project_id}; transfer ownership first")]
    OwnerMembershipLocked {
        /// Project identifier.
        project_id: ProjectId,
        /// User identifier.
        user_id: UserId,
    },

    /// Ownership changed after the transfer was planned.
    #[error("ownership of project {0} changed concurrently; retry the transfer")]
    OwnershipConflict(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
