//! Cascading deletion across the project and task contexts.

use atelier::context::RequestContext;
use atelier::error::ErrorKind;
use atelier::pagination::PageRequest;
use atelier::project::{
    domain::{AccountRole, ProjectId, ProjectRole},
    ports::{MembershipRepository, ProjectRepository, TagRepository},
    services::{AddMemberRequest, CreateProjectRequest},
};
use atelier::remote::CircuitState;
use atelier::task::services::CreateTaskRequest;
use rstest::{fixture, rstest};

use crate::test_helpers::System;

#[fixture]
fn system() -> System {
    System::new()
}

async fn seed_tasks(system: &System, project_id: ProjectId, count: usize) -> Result<(), eyre::Report> {
    let ctx = RequestContext::internal();
    for n in 0..count {
        system
            .lifecycle
            .create_task(&ctx, CreateTaskRequest::new(project_id, format!("task {n}")))
            .await?;
    }
    Ok(())
}

async fn row_counts(system: &System, project_id: ProjectId) -> Result<(u64, u64, u64), eyre::Report> {
    let members = system
        .store
        .list_members(project_id, PageRequest::first())
        .await?
        .total;
    let tags = system
        .store
        .list_tags(project_id, PageRequest::first())
        .await?
        .total;
    let tasks = system
        .lifecycle
        .list_tasks(&RequestContext::internal(), project_id, PageRequest::first())
        .await?
        .total;
    Ok((members, tags, tasks))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_project_clears_every_dependant(system: System) -> Result<(), eyre::Report> {
    let (project, owner) = system.owned_project("Alpha", "alice").await?;
    let (other, _) = system.owned_project("Beta", "bob").await?;
    let ctx = RequestContext::for_user(owner);
    let editor = system.user("erin", AccountRole::User)?;
    system
        .members
        .add_member(
            &ctx,
            project.id(),
            AddMemberRequest::new(editor).with_role(ProjectRole::Editor),
        )
        .await?;
    system.tags.create_tag(&ctx, project.id(), "urgent").await?;
    seed_tasks(&system, project.id(), 3).await?;
    seed_tasks(&system, other.id(), 1).await?;

    let report = system.projects.delete_project(&ctx, project.id()).await?;

    eyre::ensure!(report.tasks_deleted == 3, "expected 3 tasks deleted: {report:?}");
    eyre::ensure!(report.members_removed == 2, "expected 2 members removed: {report:?}");
    eyre::ensure!(report.tags_removed == 1, "expected 1 tag removed: {report:?}");
    eyre::ensure!(
        system.store.find_project(project.id()).await?.is_none(),
        "project row should be gone"
    );
    eyre::ensure!(
        row_counts(&system, project.id()).await? == (0, 0, 0),
        "dependants should be gone"
    );
    eyre::ensure!(
        row_counts(&system, other.id()).await? == (1, 0, 1),
        "other project should be untouched"
    );

    let repeat = system
        .projects
        .delete_project(&ctx, project.id())
        .await
        .expect_err("second delete finds nothing");
    eyre::ensure!(repeat.kind() == ErrorKind::NotFound, "unexpected: {repeat}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_task_breaker_keeps_local_rows(system: System) -> Result<(), eyre::Report> {
    let (project, owner) = system.owned_project("Alpha", "alice").await?;
    let ctx = RequestContext::for_user(owner);
    system.tags.create_tag(&ctx, project.id(), "urgent").await?;
    seed_tasks(&system, project.id(), 2).await?;
    system.breakers.task_service.trip();

    let err = system
        .projects
        .delete_project(&ctx, project.id())
        .await
        .expect_err("open breaker rejects the cascade");

    eyre::ensure!(err.kind() == ErrorKind::ServiceUnavailable, "unexpected: {err}");
    eyre::ensure!(
        err.to_string() == "task-service is temporarily unavailable, retry later",
        "unexpected message: {err}"
    );
    eyre::ensure!(
        system.store.find_project(project.id()).await?.is_some(),
        "project row should remain"
    );
    eyre::ensure!(
        row_counts(&system, project.id()).await? == (1, 1, 2),
        "all rows should remain"
    );

    system.breakers.task_service.reset();
    eyre::ensure!(
        system.breakers.task_service.state() == CircuitState::Closed,
        "reset should close the breaker"
    );
    system.projects.delete_project(&ctx, project.id()).await?;
    eyre::ensure!(
        row_counts(&system, project.id()).await? == (0, 0, 0),
        "retry should finish the cascade"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_deletion_removes_owned_projects_and_memberships(
    system: System,
) -> Result<(), eyre::Report> {
    let (first, alice) = system.owned_project("Alpha", "alice").await?;
    let (second, bob) = system.owned_project("Beta", "bob").await?;
    let ctx = RequestContext::for_user(alice);
    let third = system
        .projects
        .create_project(&ctx, CreateProjectRequest::new("Gamma"))
        .await?;
    system
        .members
        .add_member(
            &RequestContext::for_user(bob),
            second.id(),
            AddMemberRequest::new(alice),
        )
        .await?;
    seed_tasks(&system, first.id(), 2).await?;
    seed_tasks(&system, third.id(), 1).await?;
    seed_tasks(&system, second.id(), 1).await?;

    let report = system
        .projects
        .handle_user_deletion(&RequestContext::internal(), alice)
        .await?;

    eyre::ensure!(report.projects.len() == 2, "expected two projects: {report:?}");
    eyre::ensure!(report.memberships_removed == 1, "expected one membership: {report:?}");
    for gone in [first.id(), third.id()] {
        eyre::ensure!(
            system.store.find_project(gone).await?.is_none(),
            "owned project {gone} should be gone"
        );
        eyre::ensure!(
            row_counts(&system, gone).await? == (0, 0, 0),
            "owned project {gone} should have no dependants"
        );
    }
    eyre::ensure!(
        row_counts(&system, second.id()).await? == (1, 0, 1),
        "bob's project keeps its owner and task"
    );
    Ok(())
}
