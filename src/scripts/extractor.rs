// src/scripts/extractor.rs
// =============================================================================
// Per-domain library extraction: fetch the page, scan its scripts.
//
// A page that can't be loaded is not an error for the crawl. It is logged and
// the domain contributes an empty set, so one dead site never stops a run.
// =============================================================================

use std::sync::Arc;

use tracing::{debug, warn};

use super::fetch::PageFetcher;
use super::libraries::{scan_scripts, LibrarySet};
use crate::search::Domain;

pub struct LibraryExtractor {
    fetcher: Arc<dyn PageFetcher>,
}

impl LibraryExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    // Returns the distinct libraries used on the domain's landing page
    pub async fn extract(&self, domain: &Domain) -> LibrarySet {
        match self.fetcher.fetch(domain).await {
            Ok(html) => {
                let libraries = scan_scripts(&html);
                debug!(%domain, count = libraries.len(), "scanned page scripts");
                libraries
            }
            Err(error) => {
                warn!(%domain, reason = error.reason(), %error, "opening page failed");
                LibrarySet::new()
            }
        }
    }
}
