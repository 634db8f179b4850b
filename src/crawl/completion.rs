// src/crawl/completion.rs
// =============================================================================
// Completion detection: which worker finishes the crawl?
//
// Each worker calls advance() exactly once, after merging its results into
// the frequency table. advance() is an atomic fetch-and-add, so the returned
// values are 1, 2, ..., total, each handed to exactly one caller. The worker
// that gets `total` is the last one and writes the report.
//
// Memory ordering:
// - AcqRel on the increment: a worker's own merge is published before its
//   increment, and the last worker's increment sees every earlier one
// - The last worker still takes the table lock before reading it; the mutex
//   is what makes every other worker's merge visible to it
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
pub struct CompletionDetector {
    processed: AtomicUsize,
    total: usize,
}

impl CompletionDetector {
    pub fn new(total: usize) -> Self {
        Self {
            processed: AtomicUsize::new(0),
            total,
        }
    }

    // Marks one domain as processed and returns the new count
    pub fn advance(&self) -> usize {
        self.processed.fetch_add(1, Ordering::AcqRel) + 1
    }

    // True for the value returned to the last worker only
    pub fn is_last(&self, processed: usize) -> bool {
        processed == self.total
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Acquire)
    }

    pub fn total(&self) -> usize {
        self.total
    }
}
