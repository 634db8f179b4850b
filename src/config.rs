// src/config.rs
// =============================================================================
// Tunables for one crawl.
//
// Everything that used to be a hard-coded constant (pool size, report size,
// user agent, search endpoint, which result links count) lives here with a
// default, so the CLI can override it and tests can point the crawl at a
// local server.
// =============================================================================

use std::time::Duration;

use crate::error::ConfigError;

/// Number of concurrent workers in the crawl pool
pub const DEFAULT_WORKERS: usize = 10;
/// Number of entries in the final report
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";
/// Attribute of a result element that holds the link
pub const DEFAULT_LINK_ATTRIBUTE: &str = "href";
/// Only result links starting with this prefix are followed (secure links only)
pub const DEFAULT_LINK_PREFIX: &str = "/url?q=https://";
pub const DEFAULT_PAGE_SCHEME: &str = "https";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    pub workers: usize,
    pub top_k: usize,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub search_url: String,
    pub link_attribute: String,
    pub link_prefix: String,
    /// Scheme used to open each discovered domain
    pub page_scheme: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            top_k: DEFAULT_TOP_K,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            link_attribute: DEFAULT_LINK_ATTRIBUTE.to_string(),
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            page_scheme: DEFAULT_PAGE_SCHEME.to_string(),
        }
    }
}

impl CrawlConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_search_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    // Which result links are followed: elements whose `attribute` starts
    // with `prefix`
    pub fn with_link_filter(
        mut self,
        attribute: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        self.link_attribute = attribute.into();
        self.link_prefix = prefix.into();
        self
    }

    pub fn with_page_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.page_scheme = scheme.into();
        self
    }

    // A pool with no workers would never drain, and a zero-entry report
    // is not a report
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.top_k == 0 {
            return Err(ConfigError::EmptyReport);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.workers, 10);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.user_agent, "Mozilla/5.0");
        assert_eq!(config.link_prefix, "/url?q=https://");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = CrawlConfig::default()
            .with_workers(3)
            .with_top_k(2)
            .with_search_url("http://127.0.0.1:9000/search")
            .with_link_filter("data-href", "https://")
            .with_page_scheme("http");
        assert_eq!(config.workers, 3);
        assert_eq!(config.top_k, 2);
        assert_eq!(config.search_url, "http://127.0.0.1:9000/search");
        assert_eq!(config.link_attribute, "data-href");
        assert_eq!(config.link_prefix, "https://");
        assert_eq!(config.page_scheme, "http");
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let no_workers = CrawlConfig::default().with_workers(0);
        assert_eq!(no_workers.validate(), Err(ConfigError::NoWorkers));

        let no_report = CrawlConfig::default().with_top_k(0);
        assert_eq!(no_report.validate(), Err(ConfigError::EmptyReport));
    }
}
