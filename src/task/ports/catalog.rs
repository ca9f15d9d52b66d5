//! Port to the project service, as consumed by the task side.

use crate::project::domain::{ProjectId, Tag, TagId};
use crate::remote::RemoteResult;
use async_trait::async_trait;

/// Reverse lookups answered by the project service.
#[async_trait]
pub trait ProjectCatalog: Send + Sync {
    /// Returns `true` when the project exists.
    async fn project_exists(&self, project_id: ProjectId) -> RemoteResult<bool>;

    /// Returns the tags for `ids`; unknown identifiers are skipped.
    async fn tags_by_ids(&self, ids: &[TagId]) -> RemoteResult<Vec<Tag>>;
}
