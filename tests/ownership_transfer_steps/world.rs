//! Shared world state for ownership transfer BDD scenarios.

use std::collections::HashMap;

use atelier::project::{
    domain::{Project, ProjectId, UserId},
    services::ProjectServiceError,
};
use rstest::fixture;

use crate::test_helpers::System;

/// Scenario world for ownership transfer behaviour tests.
pub struct OwnershipWorld {
    pub system: System,
    pub users: HashMap<String, UserId>,
    pub project: Option<Project>,
    pub last_transfer: Option<Result<Project, ProjectServiceError>>,
}

impl OwnershipWorld {
    /// Creates a world with a freshly wired system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            system: System::new(),
            users: HashMap::new(),
            project: None,
            last_transfer: None,
        }
    }

    /// Looks up a user registered earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no user with that name was registered.
    pub fn user_id(&self, name: &str) -> Result<UserId, eyre::Report> {
        self.users
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown scenario user {name}"))
    }

    /// Returns the scenario's project identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no project was created yet.
    pub fn project_id(&self) -> Result<ProjectId, eyre::Report> {
        self.project
            .as_ref()
            .map(Project::id)
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }
}

impl Default for OwnershipWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OwnershipWorld {
    OwnershipWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
