//! Application services for the project context.
//!
//! Every user-facing operation follows the same sequence: resolve the
//! subject, authorize the acting user, then mutate. Authorization completes
//! before any write is issued.

mod access;
mod authorization;
mod catalog;
mod deletion;
mod error;
mod lookup;
mod membership;
mod ownership;
mod project;
mod tag;

pub use access::AccessGate;
pub use authorization::{Authorization, ProjectAuthorizer};
pub use catalog::ProjectCatalogService;
pub use deletion::{CascadingDeletionCoordinator, DeletionReport, UserDeletionReport};
pub use error::{AccessDenied, ProjectServiceError, ProjectServiceResult};
pub use membership::{AddMemberRequest, MembershipService};
pub use ownership::OwnershipTransferEngine;
pub use project::{CreateProjectRequest, ProjectService, UpdateProjectRequest};
pub use tag::TagService;
