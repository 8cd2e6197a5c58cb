//! Jindan main entry point
//!
//! This is the command-line interface for the Jindan accessibility auditor.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use jindan::audit::{run_audit, AuditEvent, ProgressFn};
use jindan::browser::HttpBrowser;
use jindan::config::load_config_with_hash;
use jindan::cost::calculate_cost;
use jindan::output::{print_summary, write_report};
use tracing_subscriber::EnvFilter;

/// Jindan: KWCAG accessibility and SEO auditor
///
/// Jindan crawls a website breadth-first, checks every discovered page
/// against the KWCAG 2.2 checklist, deduplicates violations across pages
/// and writes a JSON report with a remediation cost estimate.
#[derive(Parser, Debug)]
#[command(name = "jindan")]
#[command(version = "1.0.0")]
#[command(about = "KWCAG accessibility and SEO auditor", long_about = None)]
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

    /// Validate config and show what would be audited without running
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
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
        handle_dry_run(&config);
        Ok(())
    } else {
        handle_audit(config, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("jindan=info,warn"),
            1 => EnvFilter::new("jindan=debug,info"),
            2 => EnvFilter::new("jindan=trace,debug"),
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
fn handle_dry_run(config: &jindan::AuditConfig) {
    println!("=== Jindan Dry Run ===\n");

    println!("Target:");
    println!("  URL: {}", config.target.url);
    println!("  Platform: {}", config.target.platform);
    println!("  Inspector: {}", config.target.inspector);

    println!("\nCrawler:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!(
        "  Extra exclude patterns: {}",
        config.crawler.exclude_patterns.len()
    );
    for pattern in &config.crawler.exclude_patterns {
        println!("    - {}", pattern);
    }

    println!("\nAudit:");
    println!("  Accessibility: {}", config.audit.enable_accessibility);
    println!("  SEO/AI: {}", config.audit.enable_seo);
    println!("  Dynamic checks: {}", config.audit.enable_dynamic_check);
    println!("  Concurrency: {}", config.audit.concurrency);
    println!("  Screenshot dir: {}", config.audit.screenshot_dir);

    println!("\nLogin:");
    println!("  Enabled: {}", config.login.enabled);
    if let Some(login_url) = &config.login.login_url {
        println!("  Login URL: {}", login_url);
    }

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);

    println!("\n✓ Configuration is valid");
    println!("✓ Would audit {} starting from depth 1", config.target.url);
}

/// Handles the main audit operation
async fn handle_audit(
    config: jindan::AuditConfig,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting audit of {}", config.target.url);

    let report_path = PathBuf::from(&config.output.report_path);
    let browser = Arc::new(HttpBrowser::launch()?);

    let on_progress: Option<Arc<ProgressFn>> = if quiet {
        None
    } else {
        Some(Arc::new(|event: AuditEvent| match event {
            AuditEvent::Log(message) => println!("{message}"),
            AuditEvent::Progress {
                current,
                total,
                url,
            } => println!("  검사 완료 ({current}/{total}): {url}"),
        }))
    };

    match run_audit(config, browser, on_progress).await {
        Ok(result) => {
            let cost = calculate_cost(&result.violations);
            write_report(&result, &report_path)?;
            if !quiet {
                println!();
                print_summary(&result, &cost);
                println!("\n✓ Report written to: {}", report_path.display());
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Audit failed: {}", e);
            Err(e.into())
        }
    }
}
