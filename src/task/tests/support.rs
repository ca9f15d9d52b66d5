//! Test doubles for task service tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::pagination::{Page, PageRequest};
use crate::project::domain::{ProjectId, Tag, TagId, TagName};
use crate::remote::RemoteResult;
use crate::task::{
    adapters::InMemoryTaskRepository,
    domain::{Task, TaskId},
    ports::{ProjectCatalog, TaskRepository, TaskRepositoryResult},
};
use crate::test_support::ManualClock;

/// Catalog answering from a fixed set of projects and tags.
#[derive(Debug, Default)]
pub(super) struct StaticCatalog {
    projects: Mutex<HashSet<ProjectId>>,
    tags: Mutex<Vec<Tag>>,
}

impl StaticCatalog {
    pub(super) fn project(&self) -> ProjectId {
        let id = ProjectId::new();
        self.projects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
        id
    }

    pub(super) fn tag(&self, project_id: ProjectId, name: &str) -> Tag {
        let tag = Tag::new(
            project_id,
            TagName::new(name).expect("valid tag name"),
            &ManualClock::new(),
        );
        self.tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tag.clone());
        tag
    }
}

#[async_trait]
impl ProjectCatalog for StaticCatalog {
    async fn project_exists(&self, project_id: ProjectId) -> RemoteResult<bool> {
        Ok(self
            .projects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&project_id))
    }

    async fn tags_by_ids(&self, ids: &[TagId]) -> RemoteResult<Vec<Tag>> {
        Ok(self
            .tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|tag| ids.contains(&tag.id()))
            .cloned()
            .collect())
    }
}

/// Repository wrapper counting `save_task` calls.
#[derive(Debug, Default)]
pub(super) struct CountingRepository {
    inner: InMemoryTaskRepository,
    saves: AtomicUsize,
}

impl CountingRepository {
    pub(super) fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskRepository for CountingRepository {
    async fn store_task(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.inner.store_task(task).await
    }

    async fn save_task(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_task(task).await
    }

    async fn find_task(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_task(id).await
    }

    async fn list_tasks_by_project(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> TaskRepositoryResult<Page<Task>> {
        self.inner.list_tasks_by_project(project_id, page).await
    }

    async fn delete_tasks_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<u64> {
        self.inner.delete_tasks_for_project(project_id).await
    }
}

pub(super) struct TaskHarness {
    pub repository: Arc<CountingRepository>,
    pub catalog: Arc<StaticCatalog>,
    pub clock: Arc<ManualClock>,
}

impl TaskHarness {
    pub(super) fn new() -> Self {
        Self {
            repository: Arc::new(CountingRepository::default()),
            catalog: Arc::new(StaticCatalog::default()),
            clock: Arc::new(ManualClock::new()),
        }
    }
}
