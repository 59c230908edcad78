//! Rift-Harvest main entry point
//!
//! This is the command-line interface for the Rift-Harvest match crawler.

use anyhow::Context;
use clap::Parser;
use rift_harvest::config::{apply_env_overrides, compute_config_hash, parse_config, validate, Config};
use rift_harvest::{harvest, print_statistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Rift-Harvest: a rate-limited match-history harvester
///
/// Rift-Harvest crawls the match API outward from a seed player, enriches
/// every participant with rank and mastery data, and writes the flattened
/// rows to CSV in chunks.
#[derive(Parser, Debug)]
#[command(name = "rift-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A rate-limited match-history harvester", long_about = None)]
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

    /// Validate config and show what would be harvested without harvesting
    #[arg(long)]
    dry_run: bool,

    /// Override the seed player id
    #[arg(long, value_name = "PUUID")]
    initial_puuid: Option<String>,

    /// Override the row ceiling
    #[arg(long, value_name = "N")]
    max_rows: Option<usize>,

    /// Override the output directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

impl Cli {
    /// Patches the loaded configuration with command-line overrides
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(puuid) = &self.initial_puuid {
            config.crawl.initial_puuid = puuid.clone();
        }
        if let Some(max_rows) = self.max_rows {
            config.crawl.max_rows = max_rows;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.to_string_lossy().into_owned();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(config).await
}

/// Reads, overrides and validates the configuration
fn load(cli: &Cli) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("reading {}", cli.config.display()))?;
    let mut config = parse_config(&content)?;

    apply_env_overrides(&mut config);
    cli.apply_overrides(&mut config);
    validate(&config)?;

    let hash = compute_config_hash(&cli.config)?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("rift_harvest=info,warn"),
            1 => EnvFilter::new("rift_harvest=debug,info"),
            2 => EnvFilter::new("rift_harvest=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Rift-Harvest Dry Run ===\n");

    println!("API:");
    println!("  Match region: {}", config.api.match_region_url);
    println!("  Default platform: {}", config.api.default_platform_domain);
    println!("  Platforms ({}):", config.api.platforms.len());
    for (code, host) in &config.api.platforms {
        println!("    {} -> {}", code, host);
    }

    println!("\nCrawl:");
    println!("  Seed player: {}", config.crawl.initial_puuid);
    println!("  Max rows: {}", config.crawl.max_rows);
    println!("  Chunk size: {}", config.crawl.chunk_size);
    println!("  Matches per player: {}", config.crawl.match_history_count);
    println!("  Ceiling policy: {:?}", config.crawl.ceiling_policy);

    println!("\nFetch:");
    println!(
        "  Throughput: {} requests / {}ms",
        config.fetch.requests_per_window, config.fetch.window_ms
    );
    println!("  Max attempts: {}", config.fetch.max_attempts);
    println!(
        "  Server error cooldown: {}ms",
        config.fetch.server_error_cooldown_ms
    );
    println!(
        "  Transport error delay: {}ms",
        config.fetch.transport_error_delay_ms
    );

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  File prefix: {}", config.output.file_prefix);
    println!("  Mode: {:?}", config.output.mode);

    println!("\n✓ Configuration is valid");
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config) -> anyhow::Result<()> {
    match harvest(config).await {
        Ok(stats) => {
            tracing::info!("Harvest completed successfully");
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
