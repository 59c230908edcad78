//! Harvest module: the crawl loop and its collaborators
//!
//! This module contains the core harvesting logic, including:
//! - The player/match frontier
//! - Flattening and enrichment of match payloads
//! - Overall run coordination

mod coordinator;
mod enricher;
mod frontier;

pub use coordinator::Coordinator;
pub use enricher::{enrich, match_columns, participant_columns};
pub use frontier::Frontier;

use crate::config::Config;
use crate::output::HarvestStatistics;
use crate::HarvestError;

/// Runs a complete harvest against the live API
///
/// This is the main entry point for starting a harvest. It will:
/// 1. Build the rate-limited HTTP client and routing
/// 2. Seed the frontier with the configured player
/// 3. Crawl until the row ceiling or an empty frontier
/// 4. Write the final artifact
///
/// # Arguments
///
/// * `config` - A validated configuration
///
/// # Returns
///
/// * `Ok(HarvestStatistics)` - Harvest completed
/// * `Err(HarvestError)` - Setup or output failed
pub async fn harvest(config: Config) -> Result<HarvestStatistics, HarvestError> {
    let mut coordinator = Coordinator::from_config(config)?;
    coordinator.run().await
}
