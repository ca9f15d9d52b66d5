//! Then steps for consistency BDD scenarios.

use super::world::{ConsistencyWorld, expect_failure, run_async};
use atelier::context::RequestContext;
use atelier::pagination::PageRequest;
use atelier::project::ports::{MembershipRepository, TagRepository};
use rstest_bdd_macros::then;

#[then("the deletion succeeds")]
fn deletion_succeeds(world: &ConsistencyWorld) -> Result<(), eyre::Report> {
    match world.last_deletion.as_ref() {
        Some(Ok(_)) => Ok(()),
        Some(Err(kind)) => Err(eyre::eyre!("unexpected deletion failure: {kind}")),
        None => Err(eyre::eyre!("missing deletion result in scenario world")),
    }
}

#[then(r#"the deletion fails with "{kind}""#)]
fn deletion_fails_with(world: &ConsistencyWorld, kind: String) -> Result<(), eyre::Report> {
    expect_failure(world.last_deletion.as_ref(), &kind)
}

#[then("the project has {members:u64} members, {tags:u64} tags and {tasks:u64} tasks")]
fn project_row_counts(
    world: &ConsistencyWorld,
    members: u64,
    tags: u64,
    tasks: u64,
) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let store = &world.system.store;
    let found_members =
        run_async(store.list_members(project_id, PageRequest::first()))?.total;
    let found_tags = run_async(store.list_tags(project_id, PageRequest::first()))?.total;
    let found_tasks = run_async(world.system.lifecycle.list_tasks(
        &RequestContext::internal(),
        project_id,
        PageRequest::first(),
    ))?
    .total;
    eyre::ensure!(
        (found_members, found_tags, found_tasks) == (members, tags, tasks),
        "expected {members}/{tags}/{tasks} rows, found {found_members}/{found_tags}/{found_tasks}"
    );
    Ok(())
}

#[then(r#"deleting the project again fails with "{kind}""#)]
fn repeat_deletion_fails(world: &ConsistencyWorld, kind: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let result = run_async(
        world
            .system
            .projects
            .delete_project(&RequestContext::for_user(world.owner()?), project_id),
    )
    .map_err(|err| err.kind());
    expect_failure(Some(&result), &kind)
}

#[then("the assignment succeeds")]
fn assignment_succeeds(world: &ConsistencyWorld) -> Result<(), eyre::Report> {
    match world.last_assignment.as_ref() {
        Some(Ok(_)) => Ok(()),
        Some(Err(kind)) => Err(eyre::eyre!("unexpected assignment failure: {kind}")),
        None => Err(eyre::eyre!("missing assignment result in scenario world")),
    }
}

#[then(r#"the assignment fails with "{kind}""#)]
fn assignment_fails_with(world: &ConsistencyWorld, kind: String) -> Result<(), eyre::Report> {
    expect_failure(world.last_assignment.as_ref(), &kind)
}

#[then("the task carries {count:u64} tags")]
fn task_tag_count(world: &ConsistencyWorld, count: u64) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let stored = run_async(
        world
            .system
            .lifecycle
            .find_task(&RequestContext::internal(), task_id),
    )?;
    let linked = u64::try_from(stored.tag_ids().len())?;
    eyre::ensure!(
        linked == count,
        "expected {count} tags on the task, found {linked}"
    );
    Ok(())
}
