//! Search-as-you-type filtering for the list view.

use super::UserRecord;

/// Narrow `records` to those whose first name contains `query`, ignoring case.
///
/// Only `first_name` is matched. Relative order is preserved and an empty
/// query returns every record.
///
/// # Examples
/// ```
/// use user_directory::domain::{UserRecord, filter_by_first_name};
///
/// let records = vec![
///     UserRecord { first_name: "Ann".to_owned(), ..UserRecord::default() },
///     UserRecord { first_name: "bob".to_owned(), ..UserRecord::default() },
/// ];
/// let matches = filter_by_first_name(&records, "an");
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].first_name, "Ann");
/// ```
pub fn filter_by_first_name(records: &[UserRecord], query: &str) -> Vec<UserRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.first_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
