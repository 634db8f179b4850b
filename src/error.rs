// src/error.rs
// =============================================================================
// Error types for the crawl library.
//
// Most failures in a crawl are absorbed where they happen: a search that fails
// becomes "zero domains", a page that fails to load contributes no libraries.
// The types below exist so those failures can be logged with a precise reason,
// and so the few hard failures (bad configuration, a worker that panicked)
// reach the caller.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: lets the ? operator convert a reqwest::Error automatically
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

// Failure while querying the search engine
#[derive(Debug, Error)]
pub enum SearchError {
    /// The configured search URL could not be parsed
    #[error("invalid search URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The request itself failed (DNS, connect, timeout, TLS, ...)
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The search engine answered with a non-2xx status
    #[error("search returned HTTP {0}")]
    Status(StatusCode),
}

// Failure while loading one domain's page
#[derive(Debug, Error)]
pub enum FetchError {
    /// `<scheme>://<domain>` is not a valid URL
    #[error("invalid page URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(StatusCode),
}

impl FetchError {
    // Short, stable label for log lines
    //
    // reqwest errors are bucketed by cause, so a log reader can tell a dead
    // host from a slow one at a glance.
    pub fn reason(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl { .. } => "invalid_url",
            FetchError::Status(_) => "http_status",
            FetchError::Request(error) => {
                let message = error.to_string();
                if error.is_timeout() {
                    "timeout"
                } else if error.is_redirect() {
                    "too_many_redirects"
                } else if error.is_connect() {
                    if message.contains("dns") {
                        "dns"
                    } else {
                        "connect"
                    }
                } else if message.contains("certificate") || message.contains("ssl") {
                    "tls"
                } else {
                    "request"
                }
            }
        }
    }
}

// Rejected configuration values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("worker count must be greater than 0")]
    NoWorkers,
    #[error("report size must be greater than 0")]
    EmptyReport,
}

// Hard failures of a crawl run
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// A worker task panicked or was aborted
    #[error("worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
    /// Every worker finished but the report was not produced exactly once
    #[error("{elected} workers produced a report ({processed} of {total} domains processed), expected exactly 1")]
    Election {
        elected: usize,
        processed: usize,
        total: usize,
    },
}
