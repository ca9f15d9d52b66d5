//! When steps for consistency BDD scenarios.

use super::world::{ConsistencyWorld, run_async};
use atelier::context::RequestContext;
use rstest_bdd_macros::when;

#[when(r#""{actor}" deletes the project"#)]
fn actor_deletes_project(world: &mut ConsistencyWorld, actor: String) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    eyre::ensure!(
        world.project()?.owner_id() == owner,
        "{actor} does not own the scenario project"
    );
    let project_id = world.project()?.id();
    let result = run_async(
        world
            .system
            .projects
            .delete_project(&RequestContext::for_user(owner), project_id),
    );
    world.last_deletion = Some(result.map_err(|err| err.kind()));
    Ok(())
}

#[when(r#"the tag "{name}" is assigned to the task"#)]
fn tag_assigned_to_task(world: &mut ConsistencyWorld, name: String) -> Result<(), eyre::Report> {
    let ctx = RequestContext::for_user(world.owner()?);
    let task_id = world.task()?.id();
    let tag_id = world.tag(&name)?.id();
    let result = run_async(world.system.tagging.assign(&ctx, task_id, tag_id));
    world.last_assignment = Some(result.map_err(|err| err.kind()));
    Ok(())
}
