// src/scripts/fetch.rs
// =============================================================================
// This module loads a domain's landing page.
//
// Key functionality:
// - One shared reqwest Client (connection pooling across all workers)
// - Browser-like user agent, per-request timeout, bounded redirects
// - Any non-2xx answer counts as a failed fetch
//
// Failures are returned, not logged: the library extractor decides what a
// failed page means for the crawl.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::CrawlConfig;
use crate::error::FetchError;
use crate::search::Domain;

const MAX_REDIRECTS: usize = 10;

// Loads the HTML document served for a domain
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, domain: &Domain) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
    scheme: String,
}

impl HttpFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            client,
            scheme: config.page_scheme.clone(),
        })
    }

    // "example.com" -> https://example.com/
    fn page_url(&self, domain: &Domain) -> Result<Url, FetchError> {
        let url = format!("{}://{}", self.scheme, domain);
        Url::parse(&url).map_err(|source| FetchError::InvalidUrl { url, source })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, domain: &Domain) -> Result<String, FetchError> {
        let url = self.page_url(domain)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}
