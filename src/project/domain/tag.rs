//! Project-scoped tags.

use super::{ProjectDomainError, ProjectId, TagId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated tag name, unique within a project regardless of case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagName(String);

impl TagName {
    const MAX_LENGTH: usize = 50;

    /// Creates a validated tag name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyTagName`] when the trimmed value is
    /// empty or [`ProjectDomainError::TagNameTooLong`] when it exceeds 50
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyTagName);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(ProjectDomainError::TagNameTooLong(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the case-folded key used for uniqueness checks.
    #[must_use]
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }

    /// Returns `true` when both names collide under case-insensitive
    /// comparison.
    #[must_use]
    pub fn collides_with(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag owned by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    project_id: ProjectId,
    name: TagName,
    created_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a new tag in `project_id`.
    #[must_use]
    pub fn new(project_id: ProjectId, name: TagName, clock: &impl Clock) -> Self {
        Self {
            id: TagId::new(),
            project_id,
            name,
            created_at: clock.utc(),
        }
    }

    /// Returns the tag identifier.
    #[must_use]
    pub const fn id(&self) -> TagId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the tag name.
    #[must_use]
    pub const fn name(&self) -> &TagName {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Renames the tag.
    pub fn rename(&mut self, name: TagName) {
        self.name = name;
    }
}
