use crate::data::{GroupError, GroupRecord, GroupState, GroupSummary, MemberRecord};
use crate::store::GroupStore;
use itertools::Itertools;
use log::{error, info};

/// In-memory mapping of group name to group record.
///
/// Owns the authoritative state for the process and a [`GroupStore`] for
/// durability. Every mutation saves the full state immediately afterwards;
/// a failed save is logged and the in-memory change stands (best-effort
/// durability).
pub struct GroupRegistry<S>
where
    S: GroupStore,
{
    groups: GroupState,
    store: S,
}

impl<S> GroupRegistry<S>
where
    S: GroupStore,
{
    /// Opens the registry over the given store. Saved state is loaded when
    /// present; missing or unreadable state starts the registry empty
    /// rather than failing.
    pub fn open(store: S) -> GroupRegistry<S> {
        let groups = match store.load() {
            Ok(Some(groups)) => {
                info!("Loaded {} existing groups", groups.len());
                groups
            }
            Ok(None) => {
                info!("No existing data found, starting fresh");
                GroupState::new()
            }
            Err(e) => {
                error!("Could not read saved groups, starting empty: {}", e);
                GroupState::new()
            }
        };

        GroupRegistry { groups, store }
    }

    /// Creates a new empty group. The name match is exact and
    /// case-sensitive.
    pub fn create(
        &mut self,
        name: &str,
        description: &str,
        created_by: &str,
    ) -> Result<&GroupRecord, GroupError> {
        if self.groups.contains_key(name) {
            return Err(GroupError::AlreadyExists {
                name: name.to_string(),
            });
        }

        self.groups
            .insert(name.to_string(), GroupRecord::new(description, created_by));
        self.persist();

        Ok(&self.groups[name])
    }

    pub fn get(&self, name: &str) -> Result<&GroupRecord, GroupError> {
        self.groups.get(name).ok_or_else(|| GroupError::NotFound {
            name: name.to_string(),
        })
    }

    /// Adds `member` to the group, replacing any existing member whose name
    /// matches case-insensitively. The new member always lands at the end
    /// of the sequence, so a replaced member changes position. Returns the
    /// updated member count.
    pub fn add_or_replace_member(
        &mut self,
        group_name: &str,
        member: MemberRecord,
    ) -> Result<usize, GroupError> {
        let group = self
            .groups
            .get_mut(group_name)
            .ok_or_else(|| GroupError::NotFound {
                name: group_name.to_string(),
            })?;

        let folded = member.name.to_lowercase();
        if let Some(position) = group
            .members
            .iter()
            .position(|existing| existing.name.to_lowercase() == folded)
        {
            group.members.remove(position);
        }

        group.members.push(member);
        let count = group.members.len();
        self.persist();

        Ok(count)
    }

    /// Removes the group and all of its members.
    pub fn delete(&mut self, name: &str) -> Result<(), GroupError> {
        if self.groups.remove(name).is_none() {
            return Err(GroupError::NotFound {
                name: name.to_string(),
            });
        }

        self.persist();
        Ok(())
    }

    /// One summary row per group, in lexicographic name order.
    pub fn list(&self) -> Vec<GroupSummary> {
        self.groups
            .iter()
            .map(|(name, record)| GroupSummary {
                name: name.clone(),
                description: record.info.description.clone(),
                member_count: record.member_count(),
                created_at: record.info.created_at,
            })
            .collect_vec()
    }

    pub fn group_names(&self) -> Vec<String> {
        self.groups.keys().cloned().collect_vec()
    }

    pub fn count(&self) -> usize {
        self.groups.len()
    }

    // A failed save must not roll back or fail the mutation that triggered
    // it; the error is only logged.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.groups) {
            error!("Error saving data: {}", e);
        }
    }
}
