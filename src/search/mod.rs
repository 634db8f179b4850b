// src/search/mod.rs
// =============================================================================
// This module turns a search term into the set of domains to crawl.
//
// Submodules:
// - element: the attributes of one link on a search result page
// - domains: pulls hostnames out of result links
// - google: queries Google over HTTP and collects its result links
//
// The engine only talks to the SearchEngine trait, so tests can hand it a
// fixed list of result elements instead of hitting the network.
// =============================================================================

mod domains;
mod element;
mod google;

use async_trait::async_trait;

use crate::error::SearchError;

pub use domains::{extract_domains, match_domain, Domain};
pub use element::ResultElement;
pub use google::GoogleSearch;

// A search engine the crawl can ask for result links
//
// Parameters:
//   term: what to search for
//   desired_results: how many results to ask the engine for (a hint; the
//                    engine may return more or fewer links)
//
// Returns: every link element on the result page, or an error. The engine
// treats an error the same as an empty result.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    async fn search(
        &self,
        term: &str,
        desired_results: usize,
    ) -> Result<Vec<ResultElement>, SearchError>;
}
