//! Given steps for ownership transfer BDD scenarios.

use super::world::{OwnershipWorld, run_async};
use atelier::context::RequestContext;
use atelier::project::{
    domain::{AccountRole, ProjectRole},
    services::AddMemberRequest,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a project "{name}" owned by "{owner}""#)]
fn project_owned_by(
    world: &mut OwnershipWorld,
    name: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let (project, owner_id) = run_async(world.system.owned_project(&name, &owner))
        .wrap_err("create scenario project")?;
    world.users.insert(owner, owner_id);
    world.project = Some(project);
    Ok(())
}

#[given(r#"a registered user "{name}""#)]
fn registered_user(world: &mut OwnershipWorld, name: String) -> Result<(), eyre::Report> {
    let id = world.system.user(&name, AccountRole::User)?;
    world.users.insert(name, id);
    Ok(())
}

#[given(r#""{name}" is a member of the project with role "{role}""#)]
fn member_with_role(
    world: &mut OwnershipWorld,
    name: String,
    role: String,
) -> Result<(), eyre::Report> {
    let parsed = ProjectRole::try_from(role.as_str()).wrap_err("parse scenario role")?;
    let project = world
        .project
        .clone()
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?;
    let id = world.system.user(&name, AccountRole::User)?;
    run_async(world.system.members.add_member(
        &RequestContext::for_user(project.owner_id()),
        project.id(),
        AddMemberRequest::new(id).with_role(parsed),
    ))
    .wrap_err("add scenario member")?;
    world.users.insert(name, id);
    Ok(())
}
