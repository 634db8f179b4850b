// src/crawl/table.rs
// =============================================================================
// The shared frequency table: library -> number of domains that use it.
//
// Every worker merges its domain's library set into the same table, so the
// map sits behind one mutex. A merge takes the lock once for the whole set
// and releases it right after the in-memory update; the slow part (fetching
// the page) always happens before, outside the lock.
//
// Insertion order is preserved (IndexMap), which is what the report uses to
// break ties between libraries with the same count.
//
// Rust concepts:
// - Interior mutability: merge takes &self, the Mutex hands out &mut access
// - parking_lot::Mutex: no poisoning, so lock() returns the guard directly
// =============================================================================

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::scripts::{LibraryId, LibrarySet};

#[derive(Debug, Default)]
pub struct FrequencyTable {
    counts: Mutex<IndexMap<LibraryId, usize>>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds one occurrence for every library in the set
    //
    // The whole set is applied under a single lock acquisition, so two
    // concurrent merges can never interleave and lose an increment.
    pub fn merge(&self, libraries: &LibrarySet) {
        if libraries.is_empty() {
            return;
        }

        let mut counts = self.counts.lock();
        for library in libraries {
            *counts.entry(library.clone()).or_insert(0) += 1;
        }
    }

    // Current count for one library (0 when never seen)
    pub fn count(&self, library: &LibraryId) -> usize {
        self.counts.lock().get(library).copied().unwrap_or(0)
    }

    // All (library, count) pairs, in first-seen order
    pub fn snapshot(&self) -> Vec<(LibraryId, usize)> {
        self.counts
            .lock()
            .iter()
            .map(|(library, count)| (library.clone(), *count))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.counts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn set(names: &[&str]) -> LibrarySet {
        names.iter().map(|name| LibraryId::new(name)).collect()
    }

    fn sorted(table: &FrequencyTable) -> BTreeMap<String, usize> {
        table
            .snapshot()
            .into_iter()
            .map(|(library, count)| (library.as_str().to_string(), count))
            .collect()
    }

    #[test]
    fn test_merge_counts_each_set_once() {
        let table = FrequencyTable::new();
        assert!(table.is_empty());

        table.merge(&set(&["jquery", "react"]));
        table.merge(&set(&["jquery"]));
        table.merge(&set(&[]));
        assert!(!table.is_empty());

        assert_eq!(table.count(&LibraryId::new("jquery")), 2);
        assert_eq!(table.count(&LibraryId::new("react")), 1);
        assert_eq!(table.count(&LibraryId::new("vue")), 0);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_snapshot_keeps_insertion_order() {
        let table = FrequencyTable::new();
        table.merge(&set(&["vue"]));
        table.merge(&set(&["angular"]));
        table.merge(&set(&["vue"]));

        let snapshot = table.snapshot();
        assert_eq!(
            snapshot,
            vec![(LibraryId::new("vue"), 2), (LibraryId::new("angular"), 1)]
        );
    }

    #[test]
    fn test_merge_order_does_not_change_counts() {
        let sets = [
            set(&["jquery", "react"]),
            set(&["jquery", "vue"]),
            set(&["/js/app.js", "jquery"]),
        ];
        let orders = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];

        let mut results = Vec::new();
        for order in orders {
            let table = FrequencyTable::new();
            for index in order {
                table.merge(&sets[index]);
            }
            results.push(sorted(&table));
        }

        let expected = BTreeMap::from([
            ("/js/app.js".to_string(), 1),
            ("jquery".to_string(), 3),
            ("react".to_string(), 1),
            ("vue".to_string(), 1),
        ]);
        for result in results {
            assert_eq!(result, expected);
        }
    }

    #[test]
    fn test_concurrent_merges_lose_nothing() {
        let table = Arc::new(FrequencyTable::new());
        let libraries = set(&["jquery", "react", "vue"]);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let table = Arc::clone(&table);
                let libraries = libraries.clone();
                scope.spawn(move || {
                    for _ in 0..500 {
                        table.merge(&libraries);
                    }
                });
            }
        });

        for name in ["jquery", "react", "vue"] {
            assert_eq!(table.count(&LibraryId::new(name)), 4000);
        }
    }
}
