use crate::data::{MemberRecord, Suggestion};
use std::collections::BTreeSet;

pub trait CommonAvailability {
    fn common_days(self) -> BTreeSet<String>;
    fn common_times(self) -> BTreeSet<String>;
}

impl<'a, T> CommonAvailability for T
where
    T: Iterator<Item = &'a MemberRecord>,
{
    /// Intersects the `available_days` of every member.
    ///
    /// No members yields the empty set; a single member yields that
    /// member's full day set.
    ///
    /// # Examples
    /// ```
    /// use grouplinker_libs::availability::CommonAvailability;
    /// use grouplinker_libs::data::MemberRecord;
    ///
    /// let members = vec![
    ///     MemberRecord::new("Alice", &["Mon", "Tue"], &["9am"]),
    ///     MemberRecord::new("Bob", &["Tue", "Wed"], &["9am", "10am"]),
    /// ];
    ///
    /// let common: Vec<_> = members.iter().common_days().into_iter().collect();
    /// assert_eq!(common, vec!["Tue".to_string()]);
    /// ```
    fn common_days(self) -> BTreeSet<String> {
        intersect(self.map(|member| &member.available_days))
    }

    /// Intersects the `available_times` of every member. Identical
    /// semantics to [`common_days`](CommonAvailability::common_days).
    ///
    /// # Examples
    /// ```
    /// use grouplinker_libs::availability::CommonAvailability;
    /// use grouplinker_libs::data::MemberRecord;
    ///
    /// let members = vec![
    ///     MemberRecord::new("Alice", &["Mon"], &["9am", "1pm"]),
    ///     MemberRecord::new("Bob", &["Mon"], &["1pm", "4pm"]),
    /// ];
    ///
    /// let common: Vec<_> = members.iter().common_times().into_iter().collect();
    /// assert_eq!(common, vec!["1pm".to_string()]);
    /// ```
    fn common_times(self) -> BTreeSet<String> {
        intersect(self.map(|member| &member.available_times))
    }
}

fn intersect<'a, T>(mut sets: T) -> BTreeSet<String>
where
    T: Iterator<Item = &'a BTreeSet<String>>,
{
    match sets.next() {
        None => BTreeSet::new(),
        Some(first) => sets.fold(first.clone(), |common, set| &common & set),
    }
}

/// Computes a meeting suggestion for the named group.
///
/// A group needs at least two members before a suggestion is attempted.
/// When both common sets are non-empty the suggested slot is the
/// lexicographically smallest day and time, so repeated calls over the same
/// members always name the same slot.
///
/// # Examples
/// ```
/// use grouplinker_libs::availability::suggest;
/// use grouplinker_libs::data::MemberRecord;
///
/// let members = vec![
///     MemberRecord::new("Alice", &["Mon", "Tue"], &["9am"]),
///     MemberRecord::new("Bob", &["Tue", "Wed"], &["9am", "10am"]),
/// ];
///
/// let suggestion = suggest("Study", &members);
///
/// assert!(suggestion.eligible);
/// assert_eq!(
///     suggestion.message.as_deref(),
///     Some("Everyone in 'Study' can meet on Tue at 9am.")
/// );
/// ```
pub fn suggest(group_name: &str, members: &[MemberRecord]) -> Suggestion {
    if members.len() < 2 {
        return Suggestion {
            eligible: false,
            member_count: members.len(),
            reason: Some("insufficient members".to_string()),
            common_days: None,
            common_times: None,
            message: None,
        };
    }

    let common_days = members.iter().common_days();
    let common_times = members.iter().common_times();

    let message = match (common_days.iter().next(), common_times.iter().next()) {
        (Some(day), Some(time)) => {
            format!("Everyone in '{}' can meet on {} at {}.", group_name, day, time)
        }
        _ => format!(
            "No times work for everyone in '{}'. Consider splitting into smaller groups.",
            group_name
        ),
    };

    Suggestion {
        eligible: !common_days.is_empty() && !common_times.is_empty(),
        member_count: members.len(),
        reason: None,
        common_days: Some(common_days),
        common_times: Some(common_times),
        message: Some(message),
    }
}
