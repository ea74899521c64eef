//! Substring search over loaded tree records.
//!
//! # Invariants
//! - Matching is case-insensitive and OR-ed across `common_name`,
//!   `scientific_name` and `location`. No other field is searched.
//! - Filtering borrows; the input slice is never reordered or mutated.
//! - An empty query matches every record.

use crate::model::tree::TreeRecord;

/// Returns whether `record` matches `query`.
pub fn matches_query(record: &TreeRecord, query: &str) -> bool {
    matches_lowered(record, &query.to_lowercase())
}

/// Returns the records matching `query`, in input order.
pub fn filter_trees<'a>(records: &'a [TreeRecord], query: &str) -> Vec<&'a TreeRecord> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches_lowered(record, &needle))
        .collect()
}

/// Result count label: `1 tree found`, otherwise `N trees found`.
pub fn count_label(count: usize) -> String {
    format!("{count} {} found", pluralize(count, "tree", "trees"))
}

pub(crate) fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

fn matches_lowered(record: &TreeRecord, needle: &str) -> bool {
    [
        record.common_name.as_str(),
        record.scientific_name.as_str(),
        record.location.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::{count_label, filter_trees, matches_query};
    use crate::repo::tree_repo::{FixtureTreeRepository, TreeRepository};

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(count_label(0), "0 trees found");
        assert_eq!(count_label(1), "1 tree found");
        assert_eq!(count_label(2), "2 trees found");
    }

    #[test]
    fn scientific_name_is_searched() {
        let trees = FixtureTreeRepository::new().list_trees();
        let hits = filter_trees(&trees, "SEQUOIA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "tree-006");
    }

    #[test]
    fn description_is_not_searched() {
        let trees = FixtureTreeRepository::new().list_trees();
        assert!(!matches_query(&trees[0], "majestic"));
    }
}
