//! Port contracts for the project service.
//!
//! Ports define infrastructure-agnostic interfaces used by project services:
//! local storage on one side, sibling services on the other.

pub mod remote;
pub mod repository;

pub use remote::{TaskDeletionAck, TaskServiceClient, UserDirectory};
pub use repository::{
    MembershipRepository, ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult,
    ProjectStore, TagRepository,
};
