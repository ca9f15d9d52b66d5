//! Then steps for ownership transfer BDD scenarios.

use super::world::{OwnershipWorld, run_async};
use atelier::pagination::PageRequest;
use atelier::project::{domain::ProjectMember, ports::MembershipRepository};
use rstest_bdd_macros::then;

#[then("the transfer succeeds")]
fn transfer_succeeds(world: &OwnershipWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transfer
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transfer result in scenario world"))?;
    result
        .as_ref()
        .map(|_| ())
        .map_err(|err| eyre::eyre!("unexpected transfer failure: {err}"))
}

#[then(r#"the transfer fails with "{kind}""#)]
fn transfer_fails_with(world: &OwnershipWorld, kind: String) -> Result<(), eyre::Report> {
    let result = world
        .last_transfer
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transfer result in scenario world"))?;
    match result {
        Ok(project) => Err(eyre::eyre!(
            "expected {kind} failure, transfer returned {project:?}"
        )),
        Err(err) if err.kind().as_str() == kind => Ok(()),
        Err(err) => Err(eyre::eyre!(
            "expected {kind} failure, got {} ({err})",
            err.kind()
        )),
    }
}

#[then(r#""{name}" is the only owner of the project"#)]
fn only_owner(world: &OwnershipWorld, name: String) -> Result<(), eyre::Report> {
    let expected = world.user_id(&name)?;
    let page = run_async(
        world
            .system
            .store
            .list_members(world.project_id()?, PageRequest::first()),
    )?;
    let owners: Vec<_> = page
        .items
        .iter()
        .filter(|member| member.is_owner())
        .map(ProjectMember::user_id)
        .collect();
    eyre::ensure!(
        owners == vec![expected],
        "expected {name} as the single owner, found {owners:?}"
    );
    let recorded = world
        .project
        .as_ref()
        .map(|project| project.owner_id());
    eyre::ensure!(
        recorded == Some(expected),
        "project record names {recorded:?} as owner"
    );
    Ok(())
}

#[then(r#""{name}" holds the "{role}" role on the project"#)]
fn holds_role(world: &OwnershipWorld, name: String, role: String) -> Result<(), eyre::Report> {
    let user_id = world.user_id(&name)?;
    let member = run_async(
        world
            .system
            .store
            .find_member(world.project_id()?, user_id),
    )?
    .ok_or_else(|| eyre::eyre!("{name} is not a member"))?;
    eyre::ensure!(
        member.role().as_str() == role,
        "expected {name} to hold {role}, found {}",
        member.role()
    );
    Ok(())
}

#[then("the project has {count:u64} members")]
fn member_count(world: &OwnershipWorld, count: u64) -> Result<(), eyre::Report> {
    let page = run_async(
        world
            .system
            .store
            .list_members(world.project_id()?, PageRequest::first()),
    )?;
    eyre::ensure!(
        page.total == count,
        "expected {count} members, found {}",
        page.total
    );
    Ok(())
}
