// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   script-census "rust web framework" --results 20
//   script-census                          (asks for term and count)
//
// When the search term is missing we fall back to interactive prompts via
// `dialoguer`, which re-asks until the result count parses as a number.
// =============================================================================

use anyhow::Result;
use clap::Parser;
use dialoguer::Input;
use std::time::Duration;

use script_census::config::{
    CrawlConfig, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SEARCH_URL, DEFAULT_TOP_K, DEFAULT_WORKERS,
};

// Results requested when a term is given but no count
pub const DEFAULT_RESULTS: usize = 10;

#[derive(Parser, Debug)]
#[command(
    name = "script-census",
    version = "0.1.0",
    about = "Find the most used JavaScript libraries among a search's result pages",
    long_about = "script-census searches the web for a term, opens the landing page of every \
                  https domain in the results, and reports which JavaScript libraries those \
                  pages load most often."
)]
pub struct Cli {
    /// Search term (prompted for when omitted)
    pub term: Option<String>,

    /// Number of search results to ask the search engine for
    ///
    /// Defaults to 10 when a term is given; prompted for otherwise
    #[arg(short = 'n', long, value_parser = parse_result_count)]
    pub results: Option<usize>,

    /// Number of pages fetched concurrently
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Number of libraries in the report
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Search endpoint (Google-compatible result page)
    #[arg(long, default_value = DEFAULT_SEARCH_URL)]
    pub search_url: String,

    /// Output the report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

const RESULTS_AT_LEAST_ONE: &str = "The number of desired search results needs to be at least 1";

// Same rule as the interactive prompt: a whole number, at least 1
fn parse_result_count(value: &str) -> std::result::Result<usize, String> {
    let count: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a whole number"))?;
    if count == 0 {
        return Err(RESULTS_AT_LEAST_ONE.to_string());
    }
    Ok(count)
}

// What to search for, once CLI args and prompts are resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub term: String,
    pub results: usize,
}

impl Cli {
    pub fn build_config(&self) -> CrawlConfig {
        CrawlConfig::default()
            .with_workers(self.workers)
            .with_top_k(self.top)
            .with_request_timeout(Duration::from_secs(self.timeout))
            .with_search_url(self.search_url.as_str())
    }

    // Uses the CLI values when present, prompts for the rest
    pub fn resolve_query(&self) -> Result<Query> {
        let term = match &self.term {
            Some(term) => term.clone(),
            None => Input::<String>::new()
                .with_prompt("Please enter a search term")
                .interact_text()?,
        };

        let results = match (self.results, self.term.is_some()) {
            (Some(results), _) => results,
            (None, true) => DEFAULT_RESULTS,
            (None, false) => Input::<usize>::new()
                .with_prompt("Please enter the number of desired search results")
                .validate_with(|count: &usize| {
                    if *count > 0 {
                        Ok(())
                    } else {
                        Err(RESULTS_AT_LEAST_ONE)
                    }
                })
                .interact_text()?,
        };

        Ok(Query { term, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["script-census", "rust"]).unwrap();
        assert_eq!(cli.term.as_deref(), Some("rust"));
        assert_eq!(cli.results, None);
        assert!(!cli.json);

        let config = cli.build_config();
        assert_eq!(config, CrawlConfig::default());
    }

    #[test]
    fn test_flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "script-census",
            "web framework",
            "-n",
            "30",
            "--workers",
            "4",
            "--top",
            "3",
            "--timeout",
            "2",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.results, Some(30));
        assert!(cli.json);

        let config = cli.build_config();
        assert_eq!(config.workers, 4);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_resolve_query_without_prompting() {
        let cli = Cli::try_parse_from(["script-census", "rust"]).unwrap();
        assert_eq!(
            cli.resolve_query().unwrap(),
            Query {
                term: "rust".to_string(),
                results: DEFAULT_RESULTS
            }
        );

        let cli = Cli::try_parse_from(["script-census", "rust", "--results", "50"]).unwrap();
        assert_eq!(cli.resolve_query().unwrap().results, 50);
    }

    #[test]
    fn test_rejects_non_numeric_results() {
        let result = Cli::try_parse_from(["script-census", "rust", "--results", "many"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_results() {
        let error = Cli::try_parse_from(["script-census", "rust", "--results", "0"]).unwrap_err();
        assert!(error.to_string().contains("at least 1"));

        let result = Cli::try_parse_from(["script-census", "rust", "-n", "1"]).unwrap();
        assert_eq!(result.results, Some(1));
    }
}
