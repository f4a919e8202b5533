//! Quiz-harvest main entry point
//!
//! This is the command-line interface for the quiz-bank harvester.

use clap::Parser;
use quiz_harvest::browser::{Navigator, Session};
use quiz_harvest::config::load_config_with_hash;
use quiz_harvest::crawler::Coordinator;
use quiz_harvest::output::{print_report, write_outputs};
use quiz_harvest::storage::{load_snapshot, JsonProgressStore, ProgressStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Quiz-harvest: a resumable quiz-bank harvester
///
/// Drives a single browser session through a quiz site's topic → block →
/// quiz hierarchy, extracts the embedded question bank from each quiz page,
/// and exports the collected questions as JSON, a readable transcript, and
/// a flat CSV. Progress is durable: an interrupted run resumes where it
/// left off.
#[derive(Parser, Debug)]
#[command(name = "quiz-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A resumable quiz-bank harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Start over, discarding saved progress
    #[arg(long)]
    fresh: bool,

    /// Run the browser with a visible window
    #[arg(long)]
    headed: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["stats", "export"])]
    dry_run: bool,

    /// Show statistics from existing progress and exit
    #[arg(long, conflicts_with_all = ["dry_run", "export"])]
    stats: bool,

    /// Regenerate export files from the existing snapshot and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    export: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.export {
        handle_export(&config)?;
    } else {
        handle_crawl(config, cli.fresh, cli.headed).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quiz_harvest=info,warn"),
            1 => EnvFilter::new("quiz_harvest=debug,info"),
            2 => EnvFilter::new("quiz_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &quiz_harvest::Config, config_hash: &str) {
    println!("=== Quiz-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Entry URL: {}", config.site.entry_url);
    println!("  Subject: {}", config.site.subject);

    println!("\nBrowser:");
    println!(
        "  Headless: {} ({}x{})",
        config.browser.headless, config.browser.window_width, config.browser.window_height
    );

    println!("\nPacing:");
    println!("  Element timeout: {}ms", config.crawler.element_timeout_ms);
    println!("  Root timeout: {}ms", config.crawler.root_timeout_ms);
    println!("  Click settle: {}ms", config.crawler.settle_ms);
    println!("  Unit cooldown: {}ms", config.crawler.unit_cooldown_ms);

    println!("\nOutput:");
    println!("  Progress: {}", config.output.progress_path);
    println!("  Snapshot: {}", config.output.snapshot_path);
    println!("  JSON: {}", config.output.json_path);
    println!("  Transcript: {}", config.output.transcript_path);
    println!("  CSV: {}", config.output.csv_path);

    let progress = JsonProgressStore::load(Path::new(&config.output.progress_path));
    println!(
        "\n✓ Configuration is valid (hash: {})",
        &config_hash[..16.min(config_hash.len())]
    );
    println!(
        "✓ Would resume with {} units already completed",
        progress.completed_count()
    );
}

/// Handles the --stats mode: reports on existing progress and snapshot
fn handle_stats(config: &quiz_harvest::Config) -> Result<(), Box<dyn std::error::Error>> {
    use quiz_harvest::output::group_by_theme;

    let progress = JsonProgressStore::load(Path::new(&config.output.progress_path));

    println!("=== Harvest Statistics ===\n");
    println!("Progress file: {}", config.output.progress_path);
    println!("  Completed units: {}", progress.completed_count());
    println!("  Questions at last mark: {}", progress.total_questions());

    match load_snapshot(Path::new(&config.output.snapshot_path)) {
        Ok(bank) => {
            let groups = group_by_theme(bank.records());
            println!("\nSnapshot: {}", config.output.snapshot_path);
            println!("  Questions: {}", bank.len());
            println!("  Themes: {}", groups.len());
            for group in groups {
                println!(
                    "    {} ({}): {} questions",
                    group.theme_name,
                    group.theme_id,
                    group.questions.len()
                );
            }
        }
        Err(_) => {
            println!("\nNo readable snapshot at {}", config.output.snapshot_path);
        }
    }

    Ok(())
}

/// Handles the --export mode: rewrites export files from the snapshot
fn handle_export(config: &quiz_harvest::Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Exporting from snapshot ===\n");

    let bank = load_snapshot(Path::new(&config.output.snapshot_path))?;
    println!("Loaded {} questions from {}", bank.len(), config.output.snapshot_path);

    write_outputs(&config.output, &bank)?;

    println!("✓ Exports written:");
    println!("  - {} (structured data)", config.output.json_path);
    println!("  - {} (readable format)", config.output.transcript_path);
    println!("  - {} (spreadsheet format)", config.output.csv_path);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: quiz_harvest::Config,
    fresh: bool,
    headed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if fresh {
        tracing::info!("Starting fresh crawl (ignoring previous progress)");
    } else {
        tracing::info!("Starting crawl (will resume from saved progress)");
    }

    let headless = config.browser.headless && !headed;
    let session = Session::launch(&config.browser, &config.crawler, headless).await?;
    let navigator = Navigator::new(session, &config);
    let mut coordinator = Coordinator::new(&config, navigator, fresh);

    let (outcome, interrupted): (Result<(), quiz_harvest::HarvestError>, bool) = tokio::select! {
        result = coordinator.run() => (result.map(|_| ()), false),
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupt received, flushing current progress");
            (Ok(()), true)
        }
    };

    // Flush exports from whatever the bank holds, however the run ended
    if let Err(e) = write_outputs(&config.output, coordinator.bank()) {
        tracing::error!("Failed to write export files: {}", e);
    }
    print_report(coordinator.report());

    coordinator.into_site().close().await;

    if interrupted {
        println!("\nRun interrupted; run again to continue from saved progress.");
        return Ok(());
    }

    match outcome {
        Ok(_) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
