//! Given steps for consistency BDD scenarios.

use super::world::{ConsistencyWorld, run_async};
use atelier::context::RequestContext;
use atelier::task::services::CreateTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a project "{name}" owned by "{owner}""#)]
fn project_owned_by(
    world: &mut ConsistencyWorld,
    name: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let (project, owner_id) = run_async(world.system.owned_project(&name, &owner))
        .wrap_err("create scenario project")?;
    world.project = Some(project);
    world.owner = Some(owner_id);
    Ok(())
}

#[given(r#"the project has a tag "{name}""#)]
fn project_has_tag(world: &mut ConsistencyWorld, name: String) -> Result<(), eyre::Report> {
    let ctx = RequestContext::for_user(world.owner()?);
    let project_id = world.project()?.id();
    let tag = run_async(world.system.tags.create_tag(&ctx, project_id, &name))
        .wrap_err("create scenario tag")?;
    world.tags.insert(name, tag);
    Ok(())
}

#[given("the project has {count:u64} tasks")]
fn project_has_tasks(world: &mut ConsistencyWorld, count: u64) -> Result<(), eyre::Report> {
    let ctx = RequestContext::for_user(world.owner()?);
    let project_id = world.project()?.id();
    for n in 0..count {
        let task = run_async(
            world
                .system
                .lifecycle
                .create_task(&ctx, CreateTaskRequest::new(project_id, format!("task {n}"))),
        )
        .wrap_err("create scenario task")?;
        world.tasks.push(task);
    }
    Ok(())
}

#[given(r#"another project "{name}" owned by "{owner}" has a tag "{tag}""#)]
fn other_project_with_tag(
    world: &mut ConsistencyWorld,
    name: String,
    owner: String,
    tag: String,
) -> Result<(), eyre::Report> {
    let (project, owner_id) = run_async(world.system.owned_project(&name, &owner))
        .wrap_err("create second project")?;
    let created = run_async(world.system.tags.create_tag(
        &RequestContext::for_user(owner_id),
        project.id(),
        &tag,
    ))
    .wrap_err("create tag in second project")?;
    world.tags.insert(tag, created);
    Ok(())
}

#[given("the task service breaker is open")]
fn task_breaker_open(world: &mut ConsistencyWorld) {
    world.system.breakers.task_service.trip();
}
