// src/crawl/engine.rs
// =============================================================================
// This module runs one crawl from search term to report.
//
// How it works:
// 1. Searching:   ask the search engine for result links
// 2. Dispatching: turn the links into a set of unique domains
// 3. Running:     one worker task per domain, at most `workers` at a time.
//                 Each worker fetches its domain, merges the libraries it
//                 found into the shared table and advances the completion
//                 counter
// 4. Completed:   the worker whose advance() returns the domain total is the
//                 last one; it builds the report. The engine waits for the
//                 pool to drain and hands that report back
//
// A failed search and a search without usable links both end the run right
// away with an empty report: with zero workers nobody could be elected.
//
// Rust concepts:
// - Arc: the table and the counter are shared by every worker task
// - tokio::spawn: workers run in parallel on the multi-thread runtime
// - buffer_unordered: bounds how many workers are in flight
// =============================================================================

use std::fmt;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::task::JoinError;
use tracing::{info, warn};

use super::completion::CompletionDetector;
use super::report::{top_k, CrawlReport};
use super::table::FrequencyTable;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::scripts::{HttpFetcher, LibraryExtractor, PageFetcher};
use crate::search::{extract_domains, Domain, GoogleSearch, SearchEngine};

// Phases of a crawl run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Searching,
    Dispatching,
    Running,
    Completed,
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CrawlPhase::Searching => "searching",
            CrawlPhase::Dispatching => "dispatching",
            CrawlPhase::Running => "running",
            CrawlPhase::Completed => "completed",
        };
        f.write_str(name)
    }
}

pub struct CrawlEngine {
    search: Arc<dyn SearchEngine>,
    extractor: Arc<LibraryExtractor>,
    config: CrawlConfig,
}

impl CrawlEngine {
    // Builds an engine around the given collaborators
    //
    // Returns an error when the configuration is unusable (no workers, empty
    // report size).
    pub fn new(
        search: Arc<dyn SearchEngine>,
        fetcher: Arc<dyn PageFetcher>,
        config: CrawlConfig,
    ) -> Result<Self, CrawlError> {
        config.validate()?;

        Ok(Self {
            search,
            extractor: Arc::new(LibraryExtractor::new(fetcher)),
            config,
        })
    }

    // Builds an engine that searches Google and fetches pages over HTTP
    pub fn from_config(config: CrawlConfig) -> Result<Self, CrawlError> {
        let search = GoogleSearch::new(&config)?;
        let fetcher = HttpFetcher::new(&config)?;
        Self::new(Arc::new(search), Arc::new(fetcher), config)
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    // Runs one crawl
    //
    // Parameters:
    //   term: the search term
    //   desired_results: how many search results to ask for
    //
    // Returns: the top-K report. Per-domain failures never surface here; an
    // error means the configuration was bad or a worker panicked.
    pub async fn run(&self, term: &str, desired_results: usize) -> Result<CrawlReport, CrawlError> {
        // Step 1: ask the search engine for result links
        // A failed search is logged and treated exactly like an empty one
        enter(CrawlPhase::Searching);
        let results = match self.search.search(term, desired_results).await {
            Ok(results) => results,
            Err(error) => {
                warn!(term, desired_results, %error, "search failed");
                Vec::new()
            }
        };

        // Nothing to crawl: finish here, no worker pool is ever created
        if results.is_empty() {
            info!(term, desired_results, "search produced 0 results");
            enter(CrawlPhase::Completed);
            return Ok(CrawlReport::empty(term));
        }

        // Step 2: reduce the result links to a set of unique https domains
        enter(CrawlPhase::Dispatching);
        let domains = extract_domains(
            &results,
            &self.config.link_attribute,
            &self.config.link_prefix,
        );
        let total = domains.len();
        info!(term, total, "found https domains");

        // Zero domains must be handled here: with no workers, no advance()
        // call could ever reach the total, so nobody would be elected
        if total == 0 {
            enter(CrawlPhase::Completed);
            return Ok(CrawlReport::empty(term));
        }

        // Fresh table and counter for this run, shared by every worker
        let run = Arc::new(CrawlRun {
            term: term.to_string(),
            top_k: self.config.top_k,
            table: FrequencyTable::new(),
            completion: CompletionDetector::new(total),
        });

        // Step 3: one worker per domain
        enter(CrawlPhase::Running);
        let workers = domains.into_iter().map(|domain| {
            // Each task gets its own handle to the shared state
            // (cloning an Arc only bumps a reference count)
            let run = Arc::clone(&run);
            let extractor = Arc::clone(&self.extractor);
            tokio::spawn(async move { run.process(&extractor, domain).await })
        });

        // The map above is lazy: a worker is only spawned when
        // buffer_unordered pulls it, so at most `workers` run at once
        let outcomes: Vec<_> = stream::iter(workers)
            .buffer_unordered(self.config.workers)
            .collect()
            .await;

        // Step 4: every worker has finished; hand back the elected report
        enter(CrawlPhase::Completed);
        elected_report(outcomes, run.completion.processed(), total)
    }
}

// Picks the report out of the joined worker outcomes
//
// Exactly one worker must have produced a report. A panicked worker is
// surfaced as CrawlError::Worker; zero or several reports mean the election
// went wrong and are surfaced as CrawlError::Election.
//
// Parameters:
//   outcomes: what every spawned worker returned
//   processed: final value of the completion counter
//   total: number of dispatched domains
fn elected_report(
    outcomes: Vec<Result<Option<CrawlReport>, JoinError>>,
    processed: usize,
    total: usize,
) -> Result<CrawlReport, CrawlError> {
    let mut reports = Vec::new();
    for outcome in outcomes {
        // ? turns a JoinError into CrawlError::Worker
        if let Some(report) = outcome? {
            reports.push(report);
        }
    }

    match reports.len() {
        1 => Ok(reports.remove(0)),
        elected => Err(CrawlError::Election {
            elected,
            processed,
            total,
        }),
    }
}

fn enter(phase: CrawlPhase) {
    info!(%phase, "crawl phase");
}

// State shared by the workers of one run
struct CrawlRun {
    term: String,
    top_k: usize,
    table: FrequencyTable,
    completion: CompletionDetector,
}

impl CrawlRun {
    // One worker: extract, merge, advance, and report if elected
    async fn process(&self, extractor: &LibraryExtractor, domain: Domain) -> Option<CrawlReport> {
        // The slow part: fetch and scan the page, outside any lock
        let libraries = extractor.extract(&domain).await;

        // Short critical section: one lock for the whole set
        self.table.merge(&libraries);

        // Merge first, then advance, never the other way round: the last
        // worker must find every merge already in the table
        let processed = self.completion.advance();
        info!(
            processed,
            total = self.completion.total(),
            %domain,
            libraries = libraries.len(),
            "domain processed"
        );

        // Only the worker holding the final count writes the report
        if !self.completion.is_last(processed) {
            return None;
        }

        info!(term = %self.term, "process completed");
        Some(self.report(processed))
    }

    fn report(&self, processed: usize) -> CrawlReport {
        // snapshot() takes the table lock, which makes every other worker's
        // merge visible here
        let snapshot = self.table.snapshot();

        CrawlReport {
            term: self.term.clone(),
            domains_found: self.completion.total(),
            domains_processed: processed,
            libraries_seen: snapshot.len(),
            top: top_k(snapshot, self.top_k),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why elect a "last worker" at all if the engine joins the pool anyway?
//    - The report must be built once, after every merge, by whoever finishes
//      the crawl. The atomic counter identifies that worker without any
//      extra coordination
//    - Joining the tasks afterwards is what lets run() return the report and
//      surface a panicked worker instead of silently hanging
//
// 2. Why is the table read safely by the last worker?
//    - Every worker merges (lock, update, unlock) before it advances
//    - The last worker's snapshot takes the same lock, so it observes every
//      merge that was released before it
//
// 3. Why spawn instead of just buffering the futures?
//    - buffer_unordered alone would poll every worker on the caller's task,
//      one thread. tokio::spawn puts each worker on the runtime so they run
//      in parallel; buffer_unordered still caps how many exist at once
//
// 4. What is a JoinError?
//    - Awaiting a JoinHandle gives Result<T, JoinError>
//    - Err means the task panicked or was cancelled; we turn it into
//      CrawlError::Worker with the ? operator
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, FetchError, SearchError};
    use crate::search::ResultElement;
    use async_trait::async_trait;

    struct NoResults;

    #[async_trait]
    impl SearchEngine for NoResults {
        async fn search(&self, _term: &str, _desired: usize) -> Result<Vec<ResultElement>, SearchError> {
            Ok(Vec::new())
        }
    }

    struct NeverCalled;

    #[async_trait]
    impl PageFetcher for NeverCalled {
        async fn fetch(&self, domain: &Domain) -> Result<String, FetchError> {
            panic!("no page should be fetched, got {domain}");
        }
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(CrawlPhase::Searching.to_string(), "searching");
        assert_eq!(CrawlPhase::Completed.to_string(), "completed");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = CrawlEngine::new(
            Arc::new(NoResults),
            Arc::new(NeverCalled),
            CrawlConfig::default().with_workers(0),
        );
        assert!(matches!(
            result,
            Err(CrawlError::Config(ConfigError::NoWorkers))
        ));
    }

    fn report_for(term: &str) -> CrawlReport {
        CrawlReport::empty(term)
    }

    #[test]
    fn test_elected_report_requires_exactly_one() {
        let report = elected_report(vec![Ok(None), Ok(Some(report_for("a"))), Ok(None)], 3, 3)
            .unwrap();
        assert_eq!(report.term, "a");
    }

    #[test]
    fn test_double_election_is_an_error() {
        let result = elected_report(
            vec![Ok(Some(report_for("a"))), Ok(Some(report_for("b")))],
            2,
            2,
        );
        assert!(matches!(
            result,
            Err(CrawlError::Election { elected: 2, processed: 2, total: 2 })
        ));
    }

    #[test]
    fn test_missing_election_is_an_error() {
        let result = elected_report(vec![Ok(None), Ok(None)], 2, 2);
        assert!(matches!(
            result,
            Err(CrawlError::Election { elected: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_panicked_worker_is_reported() {
        let handle = tokio::spawn(async {
            if true {
                panic!("worker blew up");
            }
            None::<CrawlReport>
        });
        let outcome: Result<Option<CrawlReport>, JoinError> = handle.await;
        let result = elected_report(vec![outcome, Ok(Some(report_for("a")))], 2, 2);
        assert!(matches!(result, Err(CrawlError::Worker(_))));
    }

    #[tokio::test]
    async fn test_empty_search_short_circuits() {
        let engine =
            CrawlEngine::new(Arc::new(NoResults), Arc::new(NeverCalled), CrawlConfig::default())
                .unwrap();
        let report = engine.run("nothing", 10).await.unwrap();
        assert_eq!(report, CrawlReport::empty("nothing"));
    }

    #[tokio::test]
    async fn test_single_domain_reports() {
        struct OneLink;

        #[async_trait]
        impl SearchEngine for OneLink {
            async fn search(&self, _term: &str, _desired: usize) -> Result<Vec<ResultElement>, SearchError> {
                Ok(vec![ResultElement::new().with_attr("href", "/url?q=https://solo.example.com/")])
            }
        }

        struct JqueryPage;

        #[async_trait]
        impl PageFetcher for JqueryPage {
            async fn fetch(&self, _domain: &Domain) -> Result<String, FetchError> {
                Ok(r#"<script src="/jquery.js"></script>"#.to_string())
            }
        }

        let engine =
            CrawlEngine::new(Arc::new(OneLink), Arc::new(JqueryPage), CrawlConfig::default())
                .unwrap();
        let report = engine.run("solo", 1).await.unwrap();
        assert_eq!(report.domains_found, 1);
        assert_eq!(report.domains_processed, 1);
        assert_eq!(report.pairs(), vec![("jquery", 1)]);
    }
}
