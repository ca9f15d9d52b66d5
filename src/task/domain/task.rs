//! Task aggregate root.

use super::{TaskDomainError, TaskId, TaskTitle};
use crate::project::domain::{ProjectId, Tag, TagId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Task aggregate root. Tag links are stored on the task as an ordered set
/// of tag identifiers; every linked tag belongs to the task's project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    tag_ids: BTreeSet<TagId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates an untagged task in the project.
    #[must_use]
    pub fn new(project_id: ProjectId, title: TaskTitle, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id,
            title,
            tag_ids: BTreeSet::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the linked tag identifiers in ascending order.
    #[must_use]
    pub const fn tag_ids(&self) -> &BTreeSet<TagId> {
        &self.tag_ids
    }

    /// Returns `true` when the tag is linked.
    #[must_use]
    pub fn has_tag(&self, tag_id: TagId) -> bool {
        self.tag_ids.contains(&tag_id)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Links `tag` to the task.
    ///
    /// Returns `Ok(false)` without touching the task when the link already
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TagProjectMismatch`] when the tag belongs
    /// to another project.
    pub fn add_tag(&mut self, tag: &Tag, clock: &impl Clock) -> Result<bool, TaskDomainError> {
        if tag.project_id() != self.project_id {
            return Err(TaskDomainError::TagProjectMismatch {
                task_id: self.id,
                task_project: self.project_id,
                tag_id: tag.id(),
                tag_project: tag.project_id(),
            });
        }
        let inserted = self.tag_ids.insert(tag.id());
        if inserted {
            self.touch(clock);
        }
        Ok(inserted)
    }

    /// Unlinks a tag, returning whether a link was removed.
    pub fn remove_tag(&mut self, tag_id: TagId, clock: &impl Clock) -> bool {
        let removed = self.tag_ids.remove(&tag_id);
        if removed {
            self.touch(clock);
        }
        removed
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
