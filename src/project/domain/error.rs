//! Error types for project domain validation and parsing.

use super::{ProjectId, UserId};
use thiserror::Error;

/// Errors returned while constructing or changing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project name exceeds the storage limit.
    #[error("project name exceeds 100 character limit: {0}")]
    ProjectNameTooLong(String),

    /// The tag name is empty after trimming.
    #[error("tag name must not be empty")]
    EmptyTagName,

    /// The tag name exceeds the storage limit.
    #[error("tag name exceeds 50 character limit: {0}")]
    TagNameTooLong(String),

    /// The OWNER role was requested outside an ownership transfer.
    #[error("the OWNER role can only be assigned by transferring ownership")]
    OwnerRoleNotAssignable,

    /// The current owner's membership was targeted by a role change or removal.
    #[error("user {0} owns the project; transfer ownership first")]
    OwnerMembershipLocked(UserId),

    /// The project owner has no OWNER membership; the single-owner invariant
    /// is broken in storage.
    #[error("project {0} has no OWNER membership for its owner")]
    OwnerMembershipMissing(ProjectId),

    /// An update request carried no changes.
    #[error("update request must change at least one field")]
    EmptyUpdate,
}

/// Error returned while parsing a project role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project role: {0}")]
pub struct ParseProjectRoleError(pub String);

/// Error returned while parsing an account role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown account role: {0}")]
pub struct ParseAccountRoleError(pub String);
