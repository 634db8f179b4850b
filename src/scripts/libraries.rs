// src/scripts/libraries.rs
// =============================================================================
// This module finds the JavaScript libraries a page loads.
//
// How it works:
// 1. Parse the HTML and select every <script src="..."> element
// 2. Skip sources that don't mention ".js" (stylesheets, JSON, tracking pixels)
// 3. Map each source to a library name: the first known name it contains wins,
//    in a fixed priority order; an unknown script keeps its whole URL as name
// 4. Collect into a set so a library loaded twice on a page counts once
//
// Unknown scripts are kept under their raw URL, so the table can grow one
// entry per distinct unrecognised script.
// =============================================================================

use std::collections::BTreeSet;
use std::fmt;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

// Checked in this order; the first substring hit names the library
pub const KNOWN_LIBRARIES: [&str; 4] = ["jquery", "react", "angular", "vue"];

// Canonical, lowercase library identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryId(String);

impl LibraryId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// The distinct libraries found on one page
//
// Ordered, so that merging a page's libraries into the frequency table always
// inserts them in the same sequence.
pub type LibrarySet = BTreeSet<LibraryId>;

// Maps one script source to a library
//
// Examples:
//   "/static/jquery.min.js"      -> Some("jquery")
//   "/static/UnknownLib.v2.js"   -> Some("/static/unknownlib.v2.js")
//   "/static/app.css"            -> None
pub fn classify_script(src: &str) -> Option<LibraryId> {
    let src = src.to_lowercase();
    if !src.contains(".js") {
        return None;
    }

    let library = KNOWN_LIBRARIES
        .into_iter()
        .find(|name| src.contains(name))
        .map(LibraryId::new)
        .unwrap_or_else(|| LibraryId(src));

    Some(library)
}

// Scans a page for the libraries it loads
pub fn scan_scripts(html: &str) -> LibrarySet {
    let document = Html::parse_document(html);

    // Constant selector, known to be valid
    let selector = Selector::parse("script[src]").unwrap();

    document
        .select(&selector)
        .filter_map(|script| script.value().attr("src"))
        .filter_map(classify_script)
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a substring match instead of parsing the URL?
//    - Libraries are served from CDNs, bundles and vendored paths alike:
//      /js/jquery-3.7.1.min.js, https://unpkg.com/react@18/umd/react.js, ...
//    - The name is the only stable part
//
// 2. Why does the order of KNOWN_LIBRARIES matter?
//    - One URL can contain several names ("react-vue-bridge.js")
//    - The first match wins, so the result is the same on every run
//
// 3. Why BTreeSet rather than HashSet?
//    - Iteration order of a HashSet changes between runs
//    - The frequency table breaks ties by insertion order, so a
//      deterministic per-page order keeps reports reproducible
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_library_is_canonicalized() {
        assert_eq!(
            classify_script("/static/jquery.min.js"),
            Some(LibraryId::new("jquery"))
        );
    }

    #[test]
    fn test_unknown_library_keeps_lowercased_url() {
        assert_eq!(
            classify_script("/static/UnknownLib.v2.js"),
            Some(LibraryId::new("/static/unknownlib.v2.js"))
        );
    }

    #[test]
    fn test_non_js_source_is_excluded() {
        assert_eq!(classify_script("/static/app.css"), None);
    }

    #[test]
    fn test_js_substring_anywhere_counts() {
        assert_eq!(
            classify_script("https://cdn.example.com/bundle.json?v=react"),
            Some(LibraryId::new("react"))
        );
    }

    #[test]
    fn test_priority_order() {
        // Contains both "react" and "vue": react comes first in the list
        assert_eq!(
            classify_script("/js/vue-react-bridge.js"),
            Some(LibraryId::new("react"))
        );
        // Contains both "jquery" and "angular": jquery wins
        assert_eq!(
            classify_script("/js/angular-jquery-shim.js"),
            Some(LibraryId::new("jquery"))
        );
    }

    #[test]
    fn test_scan_scripts_dedupes_per_page() {
        let html = r#"
            <html><head>
              <script src="https://code.jquery.com/jquery-3.7.1.min.js"></script>
              <script src="/vendor/JQuery.UI.js"></script>
              <script src="https://unpkg.com/react@18/umd/react.production.min.js"></script>
              <script src="/assets/site.js"></script>
              <link rel="stylesheet" href="/assets/site.css">
              <script>console.log("inline");</script>
            </head></html>
        "#;
        let libraries = scan_scripts(html);
        let names: Vec<&str> = libraries.iter().map(LibraryId::as_str).collect();
        assert_eq!(names, vec!["/assets/site.js", "jquery", "react"]);
    }
}
