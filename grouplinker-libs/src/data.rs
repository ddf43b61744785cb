use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Full registry state as it is persisted: group name mapped to its record.
pub type GroupState = BTreeMap<String, GroupRecord>;

/// One person's submitted availability within a single group.
///
/// The `name` is the de-duplication key: a group holds at most one member
/// per case-insensitive name. Days and times are opaque identifiers kept in
/// ordered sets so that picks from them are deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub available_days: BTreeSet<String>,
    #[serde(default)]
    pub available_times: BTreeSet<String>,
}

impl MemberRecord {
    /// Constructs a new MemberRecord from the given day and time
    /// identifiers.
    ///
    /// # Examples
    /// ```
    /// use grouplinker_libs::data::MemberRecord;
    ///
    /// let alice = MemberRecord::new("Alice", &["Mon", "Tue"], &["9am"]);
    ///
    /// assert_eq!(alice.name, "Alice");
    /// assert!(alice.available_days.contains("Tue"));
    /// ```
    pub fn new(name: &str, available_days: &[&str], available_times: &[&str]) -> MemberRecord {
        MemberRecord {
            name: name.to_string(),
            email: None,
            available_days: available_days.iter().map(|d| d.to_string()).collect(),
            available_times: available_times.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Descriptive metadata captured when a group is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// A named collection of members. The name itself lives in the registry map
/// key; on the wire the member list is called `users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub info: GroupInfo,
    #[serde(rename = "users", default)]
    pub members: Vec<MemberRecord>,
}

impl GroupRecord {
    pub fn new(description: &str, created_by: &str) -> GroupRecord {
        GroupRecord {
            info: GroupInfo {
                description: description.to_string(),
                created_by: created_by.to_string(),
                created_at: Utc::now(),
            },
            members: vec![],
        }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Listing row for a single group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub description: String,
    pub member_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Outcome of the common-availability computation for one group.
///
/// An ineligible result either names a `reason` (too few members to
/// intersect) or carries the computed common sets alongside a message
/// recommending a split.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub eligible: bool,
    pub member_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_days: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_times: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GroupError {
    #[error("Group '{name}' already exists")]
    AlreadyExists { name: String },
    #[error("Group '{name}' not found")]
    NotFound { name: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not access the group data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("saved group data is not valid: {0}")]
    Format(#[from] serde_json::Error),
}
