//! Task-tag links resolved through the loopback catalog.

use atelier::context::RequestContext;
use atelier::error::ErrorKind;
use atelier::task::services::{CreateTaskRequest, TaskServiceError};
use rstest::{fixture, rstest};

use crate::test_helpers::System;

#[fixture]
fn system() -> System {
    System::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigned_tags_resolve_until_deleted(system: System) -> Result<(), eyre::Report> {
    let (project, owner) = system.owned_project("Alpha", "alice").await?;
    let ctx = RequestContext::for_user(owner);
    let urgent = system.tags.create_tag(&ctx, project.id(), "urgent").await?;
    let infra = system.tags.create_tag(&ctx, project.id(), "infra").await?;
    let task = system
        .lifecycle
        .create_task(&ctx, CreateTaskRequest::new(project.id(), "Rotate keys"))
        .await?;

    system.tagging.assign(&ctx, task.id(), urgent.id()).await?;
    system.tagging.assign(&ctx, task.id(), infra.id()).await?;
    let linked = system.tagging.assign(&ctx, task.id(), urgent.id()).await?;
    eyre::ensure!(linked.tag_ids().len() == 2, "duplicate assign adds nothing");

    system.tags.delete_tag(&ctx, urgent.id()).await?;
    let resolved = system.lifecycle.tags_of(&ctx, task.id()).await?;
    eyre::ensure!(resolved == vec![infra], "deleted tag is skipped: {resolved:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tag_from_another_project_is_rejected(system: System) -> Result<(), eyre::Report> {
    let (alpha, alice) = system.owned_project("Alpha", "alice").await?;
    let (beta, bob) = system.owned_project("Beta", "bob").await?;
    let foreign = system
        .tags
        .create_tag(&RequestContext::for_user(bob), beta.id(), "beta-only")
        .await?;
    let ctx = RequestContext::for_user(alice);
    let task = system
        .lifecycle
        .create_task(&ctx, CreateTaskRequest::new(alpha.id(), "Write docs"))
        .await?;

    let err = system
        .tagging
        .assign(&ctx, task.id(), foreign.id())
        .await
        .expect_err("cross-project link rejected");

    eyre::ensure!(err.kind() == ErrorKind::Validation, "unexpected: {err}");
    let stored = system.lifecycle.find_task(&ctx, task.id()).await?;
    eyre::ensure!(stored.tag_ids().is_empty(), "no link should be stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_catalog_breaker_surfaces_as_unavailable(
    system: System,
) -> Result<(), eyre::Report> {
    let (project, owner) = system.owned_project("Alpha", "alice").await?;
    let ctx = RequestContext::for_user(owner);
    let tag = system.tags.create_tag(&ctx, project.id(), "urgent").await?;
    let task = system
        .lifecycle
        .create_task(&ctx, CreateTaskRequest::new(project.id(), "Rotate keys"))
        .await?;
    system.breakers.project_service.trip();

    let err = system
        .tagging
        .assign(&ctx, task.id(), tag.id())
        .await
        .expect_err("catalog unavailable");
    eyre::ensure!(
        matches!(err, TaskServiceError::Remote(_)),
        "unexpected: {err:?}"
    );
    eyre::ensure!(err.kind() == ErrorKind::ServiceUnavailable, "unexpected: {err}");

    let create = system
        .lifecycle
        .create_task(&ctx, CreateTaskRequest::new(project.id(), "Blocked"))
        .await
        .expect_err("project check needs the catalog");
    eyre::ensure!(create.kind().is_transient(), "unexpected: {create}");
    Ok(())
}
