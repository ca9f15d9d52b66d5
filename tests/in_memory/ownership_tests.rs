//! Ownership transfer through the project service.

use atelier::context::RequestContext;
use atelier::error::ErrorKind;
use atelier::pagination::PageRequest;
use atelier::project::{
    domain::{AccountRole, ProjectId, ProjectMember, ProjectRole, UserId},
    ports::MembershipRepository,
    services::{AddMemberRequest, ProjectServiceError, UpdateProjectRequest},
};
use rstest::{fixture, rstest};

use crate::test_helpers::System;

#[fixture]
fn system() -> System {
    System::new()
}

async fn owners(system: &System, project_id: ProjectId) -> Result<Vec<UserId>, eyre::Report> {
    Ok(system
        .store
        .list_members(project_id, PageRequest::first())
        .await?
        .items
        .into_iter()
        .filter(ProjectMember::is_owner)
        .map(|member| member.user_id())
        .collect())
}

async fn role_of(
    system: &System,
    viewer: UserId,
    project_id: ProjectId,
    user_id: UserId,
) -> Result<Option<ProjectRole>, eyre::Report> {
    Ok(system
        .members
        .member_role(&RequestContext::for_user(viewer), project_id, user_id)
        .await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transfer_to_outsider_demotes_previous_owner(system: System) -> Result<(), eyre::Report> {
    let (project, alice) = system.owned_project("Alpha", "alice").await?;
    let bob = system.user("bob", AccountRole::User)?;

    let updated = system
        .projects
        .transfer_ownership(&RequestContext::for_user(alice), project.id(), bob)
        .await?;

    eyre::ensure!(updated.owner_id() == bob, "project should record bob as owner");
    eyre::ensure!(owners(&system, project.id()).await? == vec![bob], "bob is the only owner");
    eyre::ensure!(
        role_of(&system, bob, project.id(), alice).await? == Some(ProjectRole::Editor),
        "alice should be demoted to editor"
    );

    let repeat = system
        .projects
        .transfer_ownership(&RequestContext::for_user(bob), project.id(), bob)
        .await?;
    eyre::ensure!(repeat == updated, "repeat transfer should change nothing");
    eyre::ensure!(owners(&system, project.id()).await? == vec![bob], "still one owner");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transfer_to_existing_viewer_promotes_them(system: System) -> Result<(), eyre::Report> {
    let (project, alice) = system.owned_project("Alpha", "alice").await?;
    let vera = system.user("vera", AccountRole::User)?;
    system
        .members
        .add_member(
            &RequestContext::for_user(alice),
            project.id(),
            AddMemberRequest::new(vera),
        )
        .await?;

    system
        .projects
        .update_project(
            &RequestContext::for_user(alice),
            project.id(),
            UpdateProjectRequest::new().with_owner(vera),
        )
        .await?;

    eyre::ensure!(owners(&system, project.id()).await? == vec![vera], "vera is the only owner");
    let members = system
        .store
        .list_members(project.id(), PageRequest::first())
        .await?;
    eyre::ensure!(members.total == 2, "no membership added or lost: {members:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_may_transfer_without_membership(system: System) -> Result<(), eyre::Report> {
    let (project, _alice) = system.owned_project("Alpha", "alice").await?;
    let root = system.user("root", AccountRole::Admin)?;
    let bob = system.user("bob", AccountRole::User)?;

    system
        .projects
        .transfer_ownership(&RequestContext::for_user(root), project.id(), bob)
        .await?;

    eyre::ensure!(owners(&system, project.id()).await? == vec![bob], "bob is the only owner");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transfer_rejections_leave_ownership_unchanged(
    system: System,
) -> Result<(), eyre::Report> {
    let (project, alice) = system.owned_project("Alpha", "alice").await?;
    let mallory = system.user("mallory", AccountRole::User)?;

    let denied = system
        .projects
        .transfer_ownership(&RequestContext::for_user(mallory), project.id(), mallory)
        .await
        .expect_err("non-member cannot take ownership");
    eyre::ensure!(denied.kind() == ErrorKind::AccessDenied, "unexpected: {denied}");

    let ghost = UserId::new();
    let unknown = system
        .projects
        .transfer_ownership(&RequestContext::for_user(alice), project.id(), ghost)
        .await
        .expect_err("unknown user cannot receive ownership");
    eyre::ensure!(
        matches!(unknown, ProjectServiceError::UserNotFound(id) if id == ghost),
        "unexpected: {unknown}"
    );

    eyre::ensure!(owners(&system, project.id()).await? == vec![alice], "alice still owns Alpha");
    Ok(())
}
