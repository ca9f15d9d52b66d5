//! Full in-process wiring shared by integration and behaviour tests.
//!
//! Both contexts run against in-memory storage. The project side reaches the
//! task side through [`LoopbackTaskService`] and the task side reaches back
//! through [`LoopbackProjectCatalog`], each behind its own breaker.

use std::sync::Arc;

use atelier::config::{AtelierConfig, RemoteBreakers};
use atelier::context::RequestContext;
use atelier::project::{
    adapters::{
        BreakerTaskServiceClient, BreakerUserDirectory, InMemoryProjectStore,
        InMemoryUserDirectory, LoopbackTaskService,
    },
    domain::{AccountRole, Project, UserAccount, UserId},
    services::{
        CreateProjectRequest, MembershipService, ProjectCatalogService, ProjectService, TagService,
    },
};
use atelier::task::{
    adapters::{BreakerProjectCatalog, InMemoryTaskRepository, LoopbackProjectCatalog},
    services::{TagAssignmentService, TaskLifecycleService},
};
use mockable::DefaultClock;

/// Catalog used by the task side.
pub type Catalog = BreakerProjectCatalog<LoopbackProjectCatalog<InMemoryProjectStore>>;
/// Users as seen by the project side.
pub type Users = BreakerUserDirectory<InMemoryUserDirectory>;
/// Task client used by the project side.
pub type TaskClient =
    BreakerTaskServiceClient<LoopbackTaskService<InMemoryTaskRepository, Catalog, DefaultClock>>;
/// Project lifecycle service under test.
pub type Projects = ProjectService<InMemoryProjectStore, Users, TaskClient, DefaultClock>;
/// Membership service under test.
pub type Members = MembershipService<InMemoryProjectStore, Users, DefaultClock>;
/// Tag service under test.
pub type Tags = TagService<InMemoryProjectStore, Users, DefaultClock>;
/// Task lifecycle service under test.
pub type Lifecycle = TaskLifecycleService<InMemoryTaskRepository, Catalog, DefaultClock>;
/// Tag assignment service under test.
pub type Tagging = TagAssignmentService<InMemoryTaskRepository, Catalog, DefaultClock>;

/// Both contexts wired together in one process.
pub struct System {
    /// Project-side storage.
    pub store: Arc<InMemoryProjectStore>,
    /// Backing user directory; clones share state.
    pub directory: InMemoryUserDirectory,
    /// Breakers guarding each remote edge.
    pub breakers: RemoteBreakers,
    /// Project lifecycle operations.
    pub projects: Projects,
    /// Membership operations.
    pub members: Members,
    /// Tag operations.
    pub tags: Tags,
    /// Task lifecycle operations.
    pub lifecycle: Lifecycle,
    /// Task-tag link operations.
    pub tagging: Tagging,
}

impl System {
    /// Wires a fresh system with default breaker settings.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let breakers = AtelierConfig::default().breakers.build(&clock);

        let store = Arc::new(InMemoryProjectStore::new());
        let directory = InMemoryUserDirectory::new();
        let users = Arc::new(BreakerUserDirectory::new(
            directory.clone(),
            breakers.user_service.clone(),
        ));

        let catalog = Arc::new(BreakerProjectCatalog::new(
            LoopbackProjectCatalog::new(ProjectCatalogService::new(Arc::clone(&store))),
            breakers.project_service.clone(),
        ));
        let task_repository = Arc::new(InMemoryTaskRepository::new());
        let lifecycle = TaskLifecycleService::new(
            Arc::clone(&task_repository),
            Arc::clone(&catalog),
            Arc::clone(&clock),
        );
        let tagging = TagAssignmentService::new(
            Arc::clone(&task_repository),
            Arc::clone(&catalog),
            Arc::clone(&clock),
        );
        let task_client = Arc::new(BreakerTaskServiceClient::new(
            LoopbackTaskService::new(TaskLifecycleService::new(
                Arc::clone(&task_repository),
                Arc::clone(&catalog),
                Arc::clone(&clock),
            )),
            breakers.task_service.clone(),
        ));

        Self {
            projects: ProjectService::new(
                Arc::clone(&store),
                Arc::clone(&users),
                task_client,
                Arc::clone(&clock),
            ),
            members: MembershipService::new(
                Arc::clone(&store),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            tags: TagService::new(Arc::clone(&store), users, clock),
            store,
            directory,
            breakers,
            lifecycle,
            tagging,
        }
    }

    /// Registers a user and returns their identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory rejects the insert.
    pub fn user(&self, name: &str, role: AccountRole) -> Result<UserId, eyre::Report> {
        let id = UserId::new();
        self.directory
            .insert(UserAccount::new(id, name, role))
            .map_err(|err| eyre::eyre!("register {name}: {err}"))?;
        Ok(id)
    }

    /// Creates a project owned by a newly registered user.
    ///
    /// # Errors
    ///
    /// Returns an error if registration or project creation fails.
    pub async fn owned_project(
        &self,
        project: &str,
        owner: &str,
    ) -> Result<(Project, UserId), eyre::Report> {
        let owner_id = self.user(owner, AccountRole::User)?;
        let created = self
            .projects
            .create_project(
                &RequestContext::for_user(owner_id),
                CreateProjectRequest::new(project),
            )
            .await
            .map_err(|err| eyre::eyre!("create {project}: {err}"))?;
        Ok((created, owner_id))
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}
