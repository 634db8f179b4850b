// src/scripts/mod.rs
// =============================================================================
// This module works out which JavaScript libraries a domain uses.
//
// Submodules:
// - fetch: loads a domain's landing page over HTTP
// - libraries: scans a page's <script src> tags and names the libraries
// - extractor: glues the two together and absorbs fetch failures
// =============================================================================

mod extractor;
mod fetch;
mod libraries;

pub use extractor::LibraryExtractor;
pub use fetch::{HttpFetcher, PageFetcher};
pub use libraries::{classify_script, scan_scripts, LibraryId, LibrarySet, KNOWN_LIBRARIES};
