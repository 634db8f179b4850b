// src/crawl/mod.rs
// =============================================================================
// This module handles the concurrent crawl.
//
// Features:
// - One worker per discovered domain on a bounded pool
// - A shared, mutex-guarded frequency table the workers merge into
// - An atomic counter that elects the last worker to write the report
// - A stable top-K report (ties keep first-seen order)
// =============================================================================

mod completion;
mod engine;
mod report;
mod table;

pub use completion::CompletionDetector;
pub use engine::{CrawlEngine, CrawlPhase};
pub use report::{top_k, CrawlReport, LibraryCount};
pub use table::FrequencyTable;
