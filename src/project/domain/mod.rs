//! Domain model for projects, memberships and tags.
//!
//! The project domain owns the role hierarchy and the single-owner
//! invariant. Everything here is pure: persistence and remote lookups live
//! behind the ports in [`crate::project::ports`].

mod account;
mod error;
mod ids;
mod member;
mod ownership;
mod project;
mod role;
mod tag;

pub use account::{AccountRole, UserAccount};
pub use error::{ParseAccountRoleError, ParseProjectRoleError, ProjectDomainError};
pub use ids::{ProjectId, TagId, UserId};
pub use member::ProjectMember;
pub use ownership::OwnershipChange;
pub use project::{Project, ProjectName};
pub use role::{ProjectRole, RoleRequirement};
pub use tag::{Tag, TagName};
