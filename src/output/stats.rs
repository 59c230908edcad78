//! End-of-run statistics
//!
//! Collected by the coordinator once the loop stops and printed by the CLI.

use crate::cache::{CacheStats, KeySpaceStats};
use crate::fetch::FetchStats;
use crate::state::StopReason;
use std::path::PathBuf;
use std::time::Duration;

/// Harvest run summary
#[derive(Debug, Clone, Default)]
pub struct HarvestStatistics {
    /// Records produced (and persisted)
    pub records: usize,

    /// Matches enriched into records
    pub matches_processed: usize,

    /// Matches whose details could not be fetched
    pub matches_failed: usize,

    /// Players whose match history was requested
    pub players_explored: usize,

    /// Players dropped for an empty or failed match history
    pub players_abandoned: usize,

    /// Players still queued when the run stopped
    pub players_pending: usize,

    /// Distinct players ever queued
    pub players_known: usize,

    pub artifacts_written: usize,
    pub last_artifact: Option<PathBuf>,

    /// None only if the run never reached a terminal state
    pub stop_reason: Option<StopReason>,

    pub elapsed: Duration,
    pub fetch: FetchStats,
    pub cache: CacheStats,
}

impl HarvestStatistics {
    /// Records per second over the whole run
    pub fn record_rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.records as f64 / secs
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    match stats.stop_reason {
        Some(reason) => println!("  Stopped: {}", reason),
        None => println!("  Stopped: interrupted"),
    }
    println!("  Records: {}", stats.records);
    println!(
        "  Elapsed: {:.1}s ({:.2} records/sec)",
        stats.elapsed.as_secs_f64(),
        stats.record_rate()
    );
    println!();

    println!("Crawl:");
    println!("  Matches processed: {}", stats.matches_processed);
    println!("  Matches failed: {}", stats.matches_failed);
    println!("  Players explored: {}", stats.players_explored);
    println!("  Players abandoned: {}", stats.players_abandoned);
    println!("  Players pending: {}", stats.players_pending);
    println!("  Players known: {}", stats.players_known);
    println!();

    println!("Output:");
    println!("  Artifacts written: {}", stats.artifacts_written);
    if let Some(path) = &stats.last_artifact {
        println!("  Latest artifact: {}", path.display());
    }
    println!();

    println!("Requests:");
    println!("  Sent: {}", stats.fetch.requests);
    println!("  Throttled (429): {}", stats.fetch.throttled);
    println!("  Server errors: {}", stats.fetch.server_errors);
    println!("  Transport errors: {}", stats.fetch.transport_errors);
    println!("  Terminal failures: {}", stats.fetch.terminal_failures);
    println!("  Retries exhausted: {}", stats.fetch.exhausted);
    println!();

    println!("Cache:");
    print_key_space("Match details", &stats.cache.match_details);
    print_key_space("Match timelines", &stats.cache.match_timelines);
    print_key_space("Ranks", &stats.cache.ranks);
    print_key_space("Masteries", &stats.cache.masteries);
}

fn print_key_space(name: &str, stats: &KeySpaceStats) {
    let lookups = stats.hits + stats.misses;
    let hit_rate = if lookups > 0 {
        (stats.hits as f64 / lookups as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "  {}: {} entries, {} hits / {} lookups ({:.1}%)",
        name, stats.entries, stats.hits, lookups, hit_rate
    );
}
