//! Cancellation of matched add/delete counts.
//!
//! A line that was deleted in one place and added in another, verbatim after
//! normalization, is movement rather than change. The reducer subtracts matching
//! counts between the two tables so only the net additions and deletions
//! survive.
//!
//! The operation is idempotent: after one pass no key holds a positive count
//! in both outputs, so a second pass finds nothing to cancel.

use crate::stats::FrequencyTable;

/// Cancel matching counts between an addition table and a deletion table.
///
/// For every key in `additions`:
/// - no deletion counterpart: copied through unchanged;
/// - equal counts: dropped from both sides;
/// - more additions: the remainder stays on the add side, the key leaves the
///   delete side;
/// - more deletions: the remainder stays on the delete side, nothing is
///   emitted on the add side.
///
/// Keys present only in `deletions` pass through unchanged. Surviving keys
/// keep the iteration order of their source table.
pub fn reduce_tables(
    additions: &FrequencyTable,
    deletions: &FrequencyTable,
) -> (FrequencyTable, FrequencyTable) {
    let mut reduced_additions = FrequencyTable::new();
    let mut reduced_deletions = deletions.clone();

    for (line, &add_count) in additions {
        match reduced_deletions.get(line).copied() {
            None => {
                reduced_additions.insert(line.clone(), add_count);
            }
            Some(delete_count) if add_count == delete_count => {
                reduced_deletions.shift_remove(line);
            }
            Some(delete_count) if add_count > delete_count => {
                reduced_additions.insert(line.clone(), add_count - delete_count);
                reduced_deletions.shift_remove(line);
            }
            Some(delete_count) => {
                reduced_deletions.insert(line.clone(), delete_count - add_count);
            }
        }
    }

    (reduced_additions, reduced_deletions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u64)]) -> FrequencyTable {
        entries
            .iter()
            .map(|(line, count)| (line.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_reduce_worked_example() {
        let additions = table(&[("a", 3), ("b", 3), ("c", 3), ("d", 5)]);
        let deletions = table(&[("a", 3), ("b", 2), ("c", 4), ("e", 6)]);

        let (add, delete) = reduce_tables(&additions, &deletions);

        // a cancels fully; b keeps 1 on the add side; c keeps 1 on the
        // delete side; d and e pass through without a counterpart.
        assert_eq!(add, table(&[("b", 1), ("d", 5)]));
        assert_eq!(delete, table(&[("c", 1), ("e", 6)]));
    }

    #[test]
    fn test_reduce_preserves_iteration_order() {
        let additions = table(&[("first", 2), ("second", 1), ("third", 4)]);
        let deletions = table(&[("zeroth", 1), ("second", 1), ("third", 1)]);

        let (add, delete) = reduce_tables(&additions, &deletions);

        let add_keys: Vec<&str> = add.keys().map(String::as_str).collect();
        let delete_keys: Vec<&str> = delete.keys().map(String::as_str).collect();
        assert_eq!(add_keys, ["first", "third"]);
        assert_eq!(delete_keys, ["zeroth"]);
        assert_eq!(add["third"], 3);
    }

    #[test]
    fn test_reduce_disjoint_tables_is_identity() {
        let additions = table(&[("x", 1), ("y", 2)]);
        let deletions = table(&[("p", 3), ("q", 4)]);

        let (add, delete) = reduce_tables(&additions, &deletions);
        assert_eq!(add, additions);
        assert_eq!(delete, deletions);
    }

    #[test]
    fn test_reduce_identical_tables_cancel_completely() {
        let both = table(&[("moved once", 1), ("moved twice", 2)]);

        let (add, delete) = reduce_tables(&both, &both);
        assert!(add.is_empty());
        assert!(delete.is_empty());
    }

    #[test]
    fn test_reduce_empty_tables() {
        let (add, delete) = reduce_tables(&FrequencyTable::new(), &FrequencyTable::new());
        assert!(add.is_empty());
        assert!(delete.is_empty());
    }

    #[test]
    fn test_mutual_exclusion_invariant() {
        let additions = table(&[("a", 7), ("b", 1), ("c", 2), ("d", 9)]);
        let deletions = table(&[("a", 2), ("b", 6), ("c", 2), ("e", 1)]);

        let (add, delete) = reduce_tables(&additions, &deletions);
        for key in add.keys() {
            assert!(!delete.contains_key(key), "{key} present on both sides");
        }
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let additions = table(&[("a", 3), ("b", 3), ("c", 3), ("d", 5)]);
        let deletions = table(&[("a", 3), ("b", 2), ("c", 4), ("e", 6)]);

        let (add_once, delete_once) = reduce_tables(&additions, &deletions);
        let (add_twice, delete_twice) = reduce_tables(&add_once, &delete_once);
        assert_eq!(add_once, add_twice);
        assert_eq!(delete_once, delete_twice);
    }
}
