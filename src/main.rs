// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (progress goes to stderr)
// 2. Parse command-line arguments, prompting for anything missing
// 3. Run the crawl
// 4. Print the report as a table or as JSON
// 5. Exit with 0 on success (an empty report included), 2 on error
//
// Rust concepts used:
// - async/await: the crawl fetches many pages concurrently
// - anyhow::Context: attaches a human-readable reason to an error
// - A library crate plus a binary: the engine lives in script_census so
//   integration tests can drive it without the CLI
// =============================================================================

// Module declarations - only the CLI is private to the binary
mod cli; // src/cli.rs - argument parsing and prompts

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables Cli::parse()

use cli::Cli;
use script_census::{telemetry, CrawlEngine, CrawlReport};

// #[tokio::main] builds the multi-thread runtime the worker pool runs on
#[tokio::main]
async fn main() {
    // Logging first, so argument and setup failures are visible too
    telemetry::init_telemetry();

    // Any error that reaches main is printed once, with its causes
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Resolves the query, runs the crawl and prints the report
// Returns:
//   Ok(0) = crawl finished (even if it found nothing)
//   Err   = bad arguments, client setup failure or a failed worker
async fn run() -> Result<i32> {
    // clap handles --help and --version and rejects bad values before we run
    let cli = Cli::parse();

    // A missing term (and then a missing count) is asked for interactively
    let query = cli.resolve_query()?;
    let config = cli.build_config();

    // Validates the config and builds the shared HTTP client
    let engine = CrawlEngine::from_config(config).context("failed to set up the crawl")?;

    // Keep stdout clean for JSON consumers
    if !cli.json {
        println!(
            "🔍 Searching for '{}' ({} results requested)",
            query.term, query.results
        );
    }

    // Search, fan out over the domains, wait for the elected report
    let report = engine
        .run(&query.term, query.results)
        .await
        .with_context(|| format!("crawl for '{}' failed", query.term))?;

    print_report(&report, engine.config().top_k, cli.json)?;
    Ok(0)
}

// Prints the report in the format the user asked for
// Parameters:
//   report: the finished crawl
//   top_k: how many libraries were requested (for the heading)
//   json: whether to output JSON format
fn print_report(report: &CrawlReport, top_k: usize, json: bool) -> Result<()> {
    if json {
        // CrawlReport derives Serialize, so serde does the formatting
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report, top_k);
    }
    Ok(())
}

// Human-readable output: ranking first, then the run summary
fn print_table(report: &CrawlReport, top_k: usize) {
    // Nothing was crawled, so there is no ranking to show
    if report.domains_found == 0 {
        println!(
            "⚠️  The search for '{}' produced 0 https domains",
            report.term
        );
        return;
    }

    println!("\n✅ Process completed!\n");

    if report.is_empty() {
        // Domains were crawled but none of their pages loaded a script
        println!("No JavaScript libraries found");
    } else {
        println!("Top {} used JavaScript libraries:\n", top_k);
        println!("{:>7}   {}", "COUNT", "LIBRARY");
        println!("{}", "=".repeat(60));
        // Already sorted: highest count first, ties in first-seen order
        for entry in &report.top {
            println!("{:>7} - {}", entry.count, entry.library);
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   🌐 Domains found: {}", report.domains_found);
    println!("   📄 Domains processed: {}", report.domains_processed);
    println!("   📚 Distinct libraries: {}", report.libraries_seen);
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does main() not return Result?
//    - Returning Err from main exits with code 1 and Debug-prints the error
//    - Handling it here lets us choose the exit code and print {:#} instead
//
// 2. Why is an empty report exit code 0?
//    - A search that finds no libraries is a valid answer, not a failure
//
// 3. Why the "🔍 Searching" line only in table mode?
//    - With --json, stdout must hold nothing but the JSON document so it can
//      be piped into jq or another program
// -----------------------------------------------------------------------------
