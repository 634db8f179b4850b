// src/lib.rs
// =============================================================================
// script-census: which JavaScript libraries do the top search results use?
//
// Given a search term, the crawl asks a search engine for results, collects
// the unique https domains among them, loads every domain's landing page on a
// bounded pool of workers, and counts the libraries referenced by the pages'
// <script src> tags. The most used libraries come back as a report.
//
// Modules:
// - search: search engine seam, Google implementation, domain extraction
// - scripts: page fetching and script-to-library mapping
// - crawl: the worker pool, shared frequency table, completion detection
// - config: tunables with defaults
// - error: typed errors
// - telemetry: tracing subscriber setup for the binary
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod scripts;
pub mod search;
pub mod telemetry;

pub use config::CrawlConfig;
pub use crawl::{CrawlEngine, CrawlReport, LibraryCount};
pub use error::{ConfigError, CrawlError, FetchError, SearchError};
pub use scripts::{LibraryId, PageFetcher};
pub use search::{Domain, ResultElement, SearchEngine};
