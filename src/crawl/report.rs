// src/crawl/report.rs
// =============================================================================
// The final report: the K most used libraries, most used first.
//
// Sorting is stable, so libraries with the same count stay in the order the
// frequency table first saw them. Printing is the CLI's job; this module only
// produces data.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::scripts::LibraryId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryCount {
    pub library: LibraryId,
    /// Number of domains whose landing page loads this library
    pub count: usize,
}

// Outcome of one crawl run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    pub term: String,
    /// Unique domains found in the search results
    pub domains_found: usize,
    /// Domains a worker finished with (fetch failures included)
    pub domains_processed: usize,
    /// Distinct libraries in the frequency table, before truncation
    pub libraries_seen: usize,
    pub top: Vec<LibraryCount>,
}

impl CrawlReport {
    // Report for a run that found nothing to crawl
    pub fn empty(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            domains_found: 0,
            domains_processed: 0,
            libraries_seen: 0,
            top: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }

    // (library, count) pairs, in report order
    pub fn pairs(&self) -> Vec<(&str, usize)> {
        self.top
            .iter()
            .map(|entry| (entry.library.as_str(), entry.count))
            .collect()
    }
}

// Sorts a table snapshot by descending count and keeps the first `k`
//
// Parameters:
//   snapshot: (library, count) pairs in table insertion order
//   k: maximum number of entries to keep
pub fn top_k(mut snapshot: Vec<(LibraryId, usize)>, k: usize) -> Vec<LibraryCount> {
    // sort_by is stable: equal counts keep their insertion order
    snapshot.sort_by(|a, b| b.1.cmp(&a.1));
    snapshot.truncate(k);

    snapshot
        .into_iter()
        .map(|(library, count)| LibraryCount { library, count })
        .collect()
}
