// src/search/google.rs
// =============================================================================
// This module queries Google and collects the links on its result page.
//
// Strategy:
// - Build <search_url>?q=<term>&num=<desired results>
// - GET it with a browser-like user agent (Google serves a plain HTML page to
//   "Mozilla/5.0", with results wrapped in /url?q=... redirect links)
// - Parse the page and keep every <a href> element's attributes
//
// Deciding which of those links are results is left to the domain extractor.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use super::{ResultElement, SearchEngine};
use crate::config::CrawlConfig;
use crate::error::SearchError;

pub struct GoogleSearch {
    client: Client,
    search_url: String,
}

impl GoogleSearch {
    // Builds the HTTP client once; it is reused for every search
    pub fn new(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
        })
    }

    // Example:
    //   ("rust web", 10) -> https://www.google.com/search?q=rust+web&num=10
    fn query_url(&self, term: &str, desired_results: usize) -> Result<Url, SearchError> {
        let num = desired_results.to_string();
        Url::parse_with_params(&self.search_url, &[("q", term), ("num", num.as_str())]).map_err(
            |source| SearchError::InvalidUrl {
                url: self.search_url.clone(),
                source,
            },
        )
    }
}

#[async_trait]
impl SearchEngine for GoogleSearch {
    async fn search(
        &self,
        term: &str,
        desired_results: usize,
    ) -> Result<Vec<ResultElement>, SearchError> {
        let url = self.query_url(term, desired_results)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(SearchError::Status(response.status()));
        }

        let html = response.text().await?;
        Ok(parse_result_links(&html))
    }
}

// Collects every <a href> on a result page
//
// The parsed document stays inside this function: scraper's Html is not Send,
// so it must never be held across an .await.
fn parse_result_links(html: &str) -> Vec<ResultElement> {
    let document = Html::parse_document(html);

    // Constant selector, known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .map(ResultElement::from_element)
        .collect()
}
