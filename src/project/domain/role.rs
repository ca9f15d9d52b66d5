//! Project role hierarchy.
//!
//! Roles form a total order by privilege: `OWNER > EDITOR > VIEWER`. All
//! comparisons go through [`ProjectRole::rank`] so "at least EDITOR" means
//! `rank(role) >= rank(EDITOR)` rather than membership in a hand-written set.

use super::ParseProjectRoleError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Role held by a member on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectRole {
    /// Full control, including ownership transfer and deletion.
    Owner,
    /// May change project content.
    Editor,
    /// Read-only access.
    Viewer,
}

impl ProjectRole {
    /// Role assigned when a membership is created without an explicit role.
    pub const DEFAULT: Self = Self::Viewer;

    /// Role the previous owner keeps after an ownership transfer.
    pub const DEMOTED_OWNER: Self = Self::Editor;

    /// Returns the privilege rank; higher means more privileged.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Owner => 3,
            Self::Editor => 2,
            Self::Viewer => 1,
        }
    }

    /// Returns `true` when this role is at least as privileged as `minimum`.
    #[must_use]
    pub const fn at_least(self, minimum: Self) -> bool {
        self.rank() >= minimum.rank()
    }

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Editor => "EDITOR",
            Self::Viewer => "VIEWER",
        }
    }
}

impl Default for ProjectRole {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PartialOrd for ProjectRole {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProjectRole {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectRole {
    type Error = ParseProjectRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "OWNER" => Ok(Self::Owner),
            "EDITOR" => Ok(Self::Editor),
            "VIEWER" => Ok(Self::Viewer),
            _ => Err(ParseProjectRoleError(value.to_owned())),
        }
    }
}

/// Minimum membership a caller needs for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleRequirement {
    /// Caller must be the owner.
    Owner,
    /// Caller must be an editor or the owner.
    AtLeastEditor,
    /// Caller must hold any membership.
    AnyRole,
}

impl RoleRequirement {
    /// Returns the least privileged role satisfying the requirement.
    #[must_use]
    pub const fn minimum(self) -> ProjectRole {
        match self {
            Self::Owner => ProjectRole::Owner,
            Self::AtLeastEditor => ProjectRole::Editor,
            Self::AnyRole => ProjectRole::Viewer,
        }
    }

    /// Returns `true` when `role` satisfies the requirement.
    #[must_use]
    pub const fn is_satisfied_by(self, role: ProjectRole) -> bool {
        role.at_least(self.minimum())
    }
}

impl fmt::Display for RoleRequirement {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => formatter.write_str("OWNER"),
            Self::AtLeastEditor => formatter.write_str("EDITOR or higher"),
            Self::AnyRole => formatter.write_str("any project role"),
        }
    }
}
