// src/search/domains.rs
// =============================================================================
// This module extracts domain names from search result links.
//
// Google wraps every organic result in a redirect link such as
//   /url?q=https://www.example.com/some/page&sa=U&ved=...
// We keep the links whose attribute starts with the configured prefix (by
// default only secure https links), take the first hostname-looking match in
// the value, and collect the results into a set so each domain is crawled
// once.
//
// Rust concepts:
// - LazyLock: compile the regex once, on first use
// - Newtype: Domain wraps a String so it can't be mixed up with other strings
// - HashSet: duplicates disappear on insert
// =============================================================================

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ResultElement;

// Labels of letters, digits and hyphens (1-63 chars, no leading or trailing
// hyphen) joined by dots, ending in an alphabetic label of 2-6 chars
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,6}")
        .expect("domain pattern is a valid regex")
});

// A lowercase hostname, e.g. "www.example.com"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Finds the first hostname inside a string
//
// Examples:
//   "/url?q=https://Docs.RS/regex" -> Some("docs.rs")
//   "/search?q=rust"               -> None
pub fn match_domain(value: &str) -> Option<Domain> {
    DOMAIN_PATTERN.find(value).map(|m| Domain::new(m.as_str()))
}

// Collects the unique domains referenced by result links
//
// Parameters:
//   results: the elements of the search result page
//   attribute: which attribute holds the link (usually "href")
//   prefix: only values starting with this prefix are considered
//
// Returns: the set of domains; empty when nothing matched
pub fn extract_domains(results: &[ResultElement], attribute: &str, prefix: &str) -> HashSet<Domain> {
    let mut domains = HashSet::new();

    for result in results {
        let Some(value) = result.attr(attribute) else {
            continue;
        };
        if !value.starts_with(prefix) {
            continue;
        }

        match match_domain(value) {
            Some(domain) => {
                domains.insert(domain);
            }
            None => debug!(value, "result link has no hostname, skipping"),
        }
    }

    domains
}
