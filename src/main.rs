//! Board Sieve main entry point
//!
//! This is the command-line interface for the Board Sieve searcher.

use anyhow::{bail, Context};
use board_sieve::config::{load_config_with_hash, validate, Config};
use board_sieve::crawler::{search, SearchRequest};
use board_sieve::model::BoardCategory;
use board_sieve::output::{
    generate_markdown_report, render_results, write_json_results, SearchSummary,
};
use board_sieve::pattern::{compile_pattern, title_filter_for, Highlighter, Palette};
use board_sieve::source::ContentClient;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Board Sieve: search a board/thread/post content source
///
/// Board Sieve samples the newest threads of each board, harvests every post
/// of threads whose title matches, searches the rest post by post, and prints
/// the matches with highlighted keywords.
#[derive(Parser, Debug)]
#[command(name = "board-sieve")]
#[command(version)]
#[command(about = "A bounded-concurrency board searcher", long_about = None)]
struct Cli {
    /// Search pattern (regular expression, case-insensitive)
    #[arg(value_name = "PATTERN")]
    pattern: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Boards to search, comma separated (default: every board in the category)
    #[arg(short, long, value_delimiter = ',')]
    boards: Vec<String>,

    /// Board category used when no boards are given
    #[arg(long, value_enum)]
    category: Option<BoardCategory>,

    /// Threads sampled from each board's catalog
    #[arg(long, value_name = "N")]
    max_threads: Option<usize>,

    /// Jobs allowed in flight at once
    #[arg(short, long, value_name = "N")]
    workers: Option<usize>,

    /// Save media attached to search hits
    #[arg(short, long)]
    download: bool,

    /// Root folder for saved media
    #[arg(long, value_name = "DIR")]
    download_dir: Option<String>,

    /// Substring that promotes a thread to full capture
    #[arg(long, value_name = "TEXT")]
    title_filter: Option<String>,

    /// Write a markdown report to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Write results as JSON to this file
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Validate settings and show what would be searched without searching
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid settings")?;

    // Reject a bad pattern before touching the network
    compile_pattern(&cli.pattern).context("invalid search pattern")?;

    if cli.dry_run {
        handle_dry_run(&config, &cli.pattern);
        return Ok(());
    }

    handle_search(config, &cli.pattern).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("board_sieve=info,warn"),
            1 => EnvFilter::new("board_sieve=debug,info"),
            2 => EnvFilter::new("board_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line flags win over file values
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if !cli.boards.is_empty() {
        config.boards.list = cli
            .boards
            .iter()
            .map(|b| b.trim().trim_matches('/').to_string())
            .filter(|b| !b.is_empty())
            .collect();
    }
    if let Some(category) = cli.category {
        config.boards.category = category;
    }
    if let Some(max_threads) = cli.max_threads {
        config.search.max_threads_per_board = max_threads;
    }
    if let Some(workers) = cli.workers {
        config.search.max_workers = workers;
    }
    if cli.download {
        config.search.download = true;
    }
    if let Some(dir) = &cli.download_dir {
        config.search.download_dir = dir.clone();
    }
    if let Some(filter) = &cli.title_filter {
        config.search.title_filter = Some(filter.clone());
    }
    if let Some(report) = &cli.report {
        config.output.report_path = Some(report.display().to_string());
    }
    if let Some(json) = &cli.json {
        config.output.json_path = Some(json.display().to_string());
    }
}

/// Handles the --dry-run mode: shows what would be searched
fn handle_dry_run(config: &Config, pattern: &str) {
    println!("=== Board Sieve Dry Run ===\n");

    println!("Pattern: {}", pattern);
    let title_filter = config
        .search
        .title_filter
        .as_deref()
        .map(|f| f.trim().to_lowercase())
        .unwrap_or_else(|| title_filter_for(pattern));
    println!("Title filter: {:?}", title_filter);

    let keywords = board_sieve::pattern::extract_keywords(pattern);
    if keywords.is_empty() {
        println!("Keywords: none (whole matches will be highlighted)");
    } else {
        println!("Keywords: {}", keywords.as_slice().join(", "));
    }

    println!("\nSearch:");
    println!(
        "  Threads per board: {}",
        config.search.max_threads_per_board
    );
    println!("  Workers: {}", config.search.max_workers);
    println!("  Download: {}", config.search.download);
    println!("  Download dir: {}", config.search.download_dir);

    println!("\nSource:");
    println!("  API: {}", config.source.api_base);
    println!("  Media: {}", config.source.media_base);
    println!("  Timeout: {}s", config.source.timeout_secs);

    if config.boards.list.is_empty() {
        println!(
            "\nBoards: every {} board from the board listing",
            config.boards.category
        );
    } else {
        println!("\nBoards ({}):", config.boards.list.len());
        for board in &config.boards.list {
            println!("  - /{}/", board);
        }
    }

    println!("\n✓ Settings are valid");
}

/// Handles the main search operation
async fn handle_search(config: Config, pattern: &str) -> anyhow::Result<()> {
    let client = ContentClient::new(&config.source)?;

    let boards = resolve_boards(&client, &config).await?;
    tracing::info!("Searching {} boards for {:?}", boards.len(), pattern);

    let request = SearchRequest::from_config(pattern, boards.clone(), &config.search);
    let outcome = match search(&client, &request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            return Err(e.into());
        }
    };

    let regex = compile_pattern(pattern)?;
    let highlighter = Highlighter::new(&outcome.keywords, &regex, Palette::default());
    render_results(&outcome, &highlighter, config.output.plain_text);

    if config.output.report_path.is_some() || config.output.json_path.is_some() {
        let summary = SearchSummary::from_outcome(pattern, &boards, &outcome);

        if let Some(path) = &config.output.report_path {
            generate_markdown_report(&summary, &outcome.results, Path::new(path))
                .with_context(|| format!("failed to write report {}", path))?;
            println!("✓ Report written to: {}", path);
        }

        if let Some(path) = &config.output.json_path {
            write_json_results(&outcome.results, Path::new(path))
                .with_context(|| format!("failed to write {}", path))?;
            println!("✓ Results written to: {}", path);
        }
    }

    Ok(())
}

/// Uses the configured board list, or the board listing filtered by category
async fn resolve_boards(client: &ContentClient, config: &Config) -> anyhow::Result<Vec<String>> {
    if !config.boards.list.is_empty() {
        return Ok(config.boards.list.clone());
    }

    tracing::info!("Fetching {} board listing", config.boards.category);
    let boards = client
        .fetch_boards(config.boards.category)
        .await
        .into_result()
        .context("could not fetch the board listing")?;

    if boards.is_empty() {
        bail!("no {} boards available", config.boards.category);
    }

    Ok(boards.into_iter().map(|board| board.code).collect())
}
