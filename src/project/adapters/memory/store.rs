//! In-memory store for projects, memberships and tags.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::pagination::{Page, PageRequest};
use crate::project::{
    domain::{
        OwnershipChange, Project, ProjectId, ProjectMember, ProjectName, Tag, TagId, UserId,
    },
    ports::{
        MembershipRepository, ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult,
        TagRepository,
    },
};

/// Thread-safe in-memory project store.
///
/// Projects, memberships and tags share one lock so multi-record changes
/// such as ownership transfers are atomic to concurrent readers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectStore {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    name_index: HashMap<ProjectName, ProjectId>,
    members: BTreeMap<(ProjectId, UserId), ProjectMember>,
    tags: HashMap<TagId, Tag>,
    tag_name_index: HashMap<(ProjectId, String), TagId>,
}

impl InMemoryProjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ProjectRepositoryResult<RwLockReadGuard<'_, InMemoryProjectState>> {
        self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ProjectRepositoryResult<RwLockWriteGuard<'_, InMemoryProjectState>> {
        self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl InMemoryProjectState {
    /// Points the name index at `project`'s name when it differs from
    /// `old_name`.
    fn reindex_name(
        &mut self,
        project: &Project,
        old_name: &ProjectName,
    ) -> ProjectRepositoryResult<()> {
        if project.name() == old_name {
            return Ok(());
        }
        if let Some(&indexed_id) = self.name_index.get(project.name())
            && indexed_id != project.id()
        {
            return Err(ProjectRepositoryError::DuplicateProjectName(
                project.name().clone(),
            ));
        }
        self.name_index.remove(old_name);
        self.name_index.insert(project.name().clone(), project.id());
        Ok(())
    }
}

fn to_count(removed: usize) -> u64 {
    u64::try_from(removed).unwrap_or(u64::MAX)
}

#[async_trait]
impl ProjectRepository for InMemoryProjectStore {
    async fn store_project(
        &self,
        project: &Project,
        owner: &ProjectMember,
    ) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        if state.name_index.contains_key(project.name()) {
            return Err(ProjectRepositoryError::DuplicateProjectName(
                project.name().clone(),
            ));
        }

        state
            .name_index
            .insert(project.name().clone(), project.id());
        state.projects.insert(project.id(), project.clone());
        state
            .members
            .insert((owner.project_id(), owner.user_id()), owner.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let old_name = state
            .projects
            .get(&project.id())
            .ok_or(ProjectRepositoryError::ProjectNotFound(project.id()))?
            .name()
            .clone();
        state.reindex_name(project, &old_name)?;
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_project(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read()?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn find_project_by_name(
        &self,
        name: &ProjectName,
    ) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read()?;
        let project = state
            .name_index
            .get(name)
            .and_then(|id| state.projects.get(id))
            .cloned();
        Ok(project)
    }

    async fn find_projects_by_owner(&self, owner: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read()?;
        let mut owned: Vec<Project> = state
            .projects
            .values()
            .filter(|project| project.is_owned_by(owner))
            .cloned()
            .collect();
        owned.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(owned)
    }

    async fn list_projects_for_member(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> ProjectRepositoryResult<Page<Project>> {
        let state = self.read()?;
        let mut projects: Vec<Project> = state
            .members
            .values()
            .filter(|member| member.user_id() == user_id)
            .filter_map(|member| state.projects.get(&member.project_id()))
            .cloned()
            .collect();
        projects.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(Page::paginate(projects, page))
    }

    async fn apply_ownership_change(
        &self,
        change: &OwnershipChange,
    ) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let planned = change.project();
        let project_id = planned.id();
        let mut stored = state
            .projects
            .get(&project_id)
            .cloned()
            .ok_or(ProjectRepositoryError::ProjectNotFound(project_id))?;

        let demoted_key = (project_id, change.previous_owner());
        let promoted_key = (project_id, change.promoted().user_id());
        let previous_still_owns = stored.is_owned_by(change.previous_owner())
            && state
                .members
                .get(&demoted_key)
                .is_some_and(ProjectMember::is_owner);
        let promoted_as_planned =
            state.members.contains_key(&promoted_key) != change.creates_membership();
        if !previous_still_owns || !promoted_as_planned {
            return Err(ProjectRepositoryError::OwnershipConflict(project_id));
        }

        if change.carries_details() {
            let old_name = stored.name().clone();
            state.reindex_name(planned, &old_name)?;
            stored = planned.clone();
        } else {
            stored.adopt_owner(planned);
        }

        state.projects.insert(project_id, stored);
        state.members.insert(demoted_key, change.demoted().clone());
        state.members.insert(promoted_key, change.promoted().clone());
        Ok(())
    }

    async fn delete_project(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let removed = state
            .projects
            .remove(&id)
            .ok_or(ProjectRepositoryError::ProjectNotFound(id))?;
        state.name_index.remove(removed.name());
        Ok(())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryProjectStore {
    async fn find_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<Option<ProjectMember>> {
        let state = self.read()?;
        Ok(state.members.get(&(project_id, user_id)).cloned())
    }

    async fn add_member(&self, member: &ProjectMember) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let key = (member.project_id(), member.user_id());
        if state.members.contains_key(&key) {
            return Err(ProjectRepositoryError::DuplicateMember {
                project_id: member.project_id(),
                user_id: member.user_id(),
            });
        }
        state.members.insert(key, member.clone());
        Ok(())
    }

    async fn update_member(&self, member: &ProjectMember) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let project_id = member.project_id();
        let user_id = member.user_id();
        let existing = state
            .members
            .get_mut(&(project_id, user_id))
            .ok_or(ProjectRepositoryError::MemberNotFound {
                project_id,
                user_id,
            })?;
        if existing.is_owner() || member.is_owner() {
            return Err(ProjectRepositoryError::OwnerMembershipLocked {
                project_id,
                user_id,
            });
        }
        *existing = member.clone();
        Ok(())
    }

    async fn remove_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let key = (project_id, user_id);
        let holds_owner = state
            .members
            .get(&key)
            .map(ProjectMember::is_owner)
            .ok_or(ProjectRepositoryError::MemberNotFound {
                project_id,
                user_id,
            })?;
        if holds_owner {
            return Err(ProjectRepositoryError::OwnerMembershipLocked {
                project_id,
                user_id,
            });
        }
        state.members.remove(&key);
        Ok(())
    }

    async fn list_members(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> ProjectRepositoryResult<Page<ProjectMember>> {
        let state = self.read()?;
        let mut members: Vec<ProjectMember> = state
            .members
            .values()
            .filter(|member| member.project_id() == project_id)
            .cloned()
            .collect();
        members.sort_by_key(|member| (member.joined_at(), member.user_id()));
        Ok(Page::paginate(members, page))
    }

    async fn delete_members_by_project(
        &self,
        project_id: ProjectId,
    ) -> ProjectRepositoryResult<u64> {
        let mut state = self.write()?;
        let before = state.members.len();
        state
            .members
            .retain(|(member_project, _), _| *member_project != project_id);
        Ok(to_count(before.saturating_sub(state.members.len())))
    }

    async fn delete_members_by_user(&self, user_id: UserId) -> ProjectRepositoryResult<u64> {
        let mut state = self.write()?;
        let before = state.members.len();
        state
            .members
            .retain(|(_, member_user), _| *member_user != user_id);
        Ok(to_count(before.saturating_sub(state.members.len())))
    }
}

#[async_trait]
impl TagRepository for InMemoryProjectStore {
    async fn store_tag(&self, tag: &Tag) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let key = (tag.project_id(), tag.name().key());
        if state.tag_name_index.contains_key(&key) {
            return Err(ProjectRepositoryError::DuplicateTagName {
                project_id: tag.project_id(),
                name: tag.name().clone(),
            });
        }
        state.tag_name_index.insert(key, tag.id());
        state.tags.insert(tag.id(), tag.clone());
        Ok(())
    }

    async fn update_tag(&self, tag: &Tag) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let old_key = state
            .tags
            .get(&tag.id())
            .map(|existing| (existing.project_id(), existing.name().key()))
            .ok_or(ProjectRepositoryError::TagNotFound(tag.id()))?;
        let new_key = (tag.project_id(), tag.name().key());

        if new_key != old_key {
            if let Some(&indexed_id) = state.tag_name_index.get(&new_key)
                && indexed_id != tag.id()
            {
                return Err(ProjectRepositoryError::DuplicateTagName {
                    project_id: tag.project_id(),
                    name: tag.name().clone(),
                });
            }
            state.tag_name_index.remove(&old_key);
            state.tag_name_index.insert(new_key, tag.id());
        }

        state.tags.insert(tag.id(), tag.clone());
        Ok(())
    }

    async fn find_tag(&self, id: TagId) -> ProjectRepositoryResult<Option<Tag>> {
        let state = self.read()?;
        Ok(state.tags.get(&id).cloned())
    }

    async fn find_tags(&self, ids: &[TagId]) -> ProjectRepositoryResult<Vec<Tag>> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.tags.get(id))
            .cloned()
            .collect())
    }

    async fn list_tags(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> ProjectRepositoryResult<Page<Tag>> {
        let state = self.read()?;
        let mut tags: Vec<Tag> = state
            .tags
            .values()
            .filter(|tag| tag.project_id() == project_id)
            .cloned()
            .collect();
        tags.sort_by_key(|tag| tag.name().key());
        Ok(Page::paginate(tags, page))
    }

    async fn delete_tag(&self, id: TagId) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let removed = state
            .tags
            .remove(&id)
            .ok_or(ProjectRepositoryError::TagNotFound(id))?;
        state
            .tag_name_index
            .remove(&(removed.project_id(), removed.name().key()));
        Ok(())
    }

    async fn delete_tags_by_project(&self, project_id: ProjectId) -> ProjectRepositoryResult<u64> {
        let mut state = self.write()?;
        let before = state.tags.len();
        state.tags.retain(|_, tag| tag.project_id() != project_id);
        state
            .tag_name_index
            .retain(|(tag_project, _), _| *tag_project != project_id);
        Ok(to_count(before.saturating_sub(state.tags.len())))
    }
}
