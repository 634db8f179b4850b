// src/search/element.rs
// =============================================================================
// One element of a search result page, reduced to its attributes.
//
// scraper's ElementRef borrows the parsed document, and the document is not
// Send, so it cannot travel between tasks. Copying the attributes out gives
// the rest of the crawl a plain owned value.
// =============================================================================

use std::collections::HashMap;

use scraper::ElementRef;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultElement {
    attributes: HashMap<String, String>,
}

impl ResultElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub(crate) fn from_element(element: ElementRef<'_>) -> Self {
        let attributes = element
            .value()
            .attrs()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { attributes }
    }
}
