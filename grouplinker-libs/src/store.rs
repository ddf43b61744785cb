use crate::data::{GroupState, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Durability contract: the whole registry state is loaded and saved as a
/// single document. No partial writes, no transactions.
pub trait GroupStore {
    /// Returns `Ok(None)` when no state has ever been saved. Unreadable or
    /// unparsable state is an error for the caller to decide on.
    fn load(&self) -> Result<Option<GroupState>, StoreError>;

    fn save(&mut self, state: &GroupState) -> Result<(), StoreError>;
}

/// Whole-file JSON persistence. The document maps each group name to
/// `{"info": {...}, "users": [...]}` and stays readable across restarts.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> JsonFileStore {
        JsonFileStore { path: path.into() }
    }
}

impl GroupStore for JsonFileStore {
    fn load(&self) -> Result<Option<GroupState>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            // A file that never existed is not an error, just no data.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&mut self, state: &GroupState) -> Result<(), StoreError> {
        let document = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, document)?;
        Ok(())
    }
}

/// Keeps the last saved state in memory. Test double for the registry.
#[derive(Default)]
pub struct MemoryStore {
    saved: Option<GroupState>,
}

impl GroupStore for MemoryStore {
    fn load(&self) -> Result<Option<GroupState>, StoreError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, state: &GroupState) -> Result<(), StoreError> {
        self.saved = Some(state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GroupRecord, GroupState, MemberRecord};

    fn sample_state() -> GroupState {
        let mut group = GroupRecord::new("weekly sync", "carol");
        group
            .members
            .push(MemberRecord::new("Alice", &["Mon"], &["9am"]));

        let mut state = GroupState::new();
        state.insert("Study".to_string(), group);
        state
    }

    #[test]
    fn file_store_round_trips_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("groups_data.json"));

        let state = sample_state();
        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap(), Some(state));
    }

    #[test]
    fn missing_file_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("groups_data.json"));

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups_data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Format(_))));
    }

    #[test]
    fn saved_document_uses_wire_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups_data.json");
        let mut store = JsonFileStore::new(&path);

        store.save(&sample_state()).unwrap();

        let document: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let group = &document["Study"];
        assert_eq!(group["info"]["description"], "weekly sync");
        assert_eq!(group["info"]["created_by"], "carol");
        assert_eq!(group["users"][0]["name"], "Alice");
    }
}
