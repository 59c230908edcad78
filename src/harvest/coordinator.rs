//! Harvest coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the pieces together:
//! - Popping players from the frontier
//! - Fetching match histories and match payloads through the cache
//! - Enriching matches into flat records
//! - Flushing records to disk on the chunk cadence
//! - Stopping on the row ceiling or an empty frontier

use crate::api::{MatchApi, RiotApi};
use crate::cache::ResponseCache;
use crate::config::{CeilingPolicy, Config, CrawlConfig, OutputConfig};
use crate::harvest::enricher::enrich;
use crate::harvest::frontier::Frontier;
use crate::model::{FlatRecord, MatchId};
use crate::output::{ChunkWriter, HarvestStatistics};
use crate::state::RunState;
use crate::HarvestError;
use std::collections::HashSet;
use std::time::Instant;

/// Main harvest coordinator structure
pub struct Coordinator<A: MatchApi> {
    crawl: CrawlConfig,
    api: A,
    cache: ResponseCache,
    frontier: Frontier,
    writer: ChunkWriter,
    records: Vec<FlatRecord>,
    state: RunState,
    players_explored: usize,
    players_abandoned: usize,
    matches_processed: usize,

    /// Matches with no usable details, each counted once
    failed_matches: HashSet<MatchId>,
}

impl Coordinator<RiotApi> {
    /// Creates a coordinator backed by the HTTP API client
    ///
    /// # Arguments
    ///
    /// * `config` - A validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(HarvestError)` - The HTTP client or output directory could not be set up
    pub fn from_config(config: Config) -> Result<Self, HarvestError> {
        let api = RiotApi::from_config(&config)?;
        Self::new(config.crawl, &config.output, api)
    }
}

impl<A: MatchApi> Coordinator<A> {
    /// Creates a coordinator over any [`MatchApi`]
    ///
    /// The frontier is seeded with `crawl.initial_puuid`; cache and buffers
    /// start empty.
    pub fn new(crawl: CrawlConfig, output: &OutputConfig, api: A) -> Result<Self, HarvestError> {
        let writer = ChunkWriter::create(
            &output.directory,
            &output.file_prefix,
            output.mode,
            crawl.chunk_size,
        )?;
        let frontier = Frontier::with_seed(&crawl.initial_puuid);
        let state = RunState::evaluate(0, crawl.max_rows, frontier.pending_len());

        Ok(Self {
            crawl,
            api,
            cache: ResponseCache::new(),
            frontier,
            writer,
            records: Vec::new(),
            state,
            players_explored: 0,
            players_abandoned: 0,
            matches_processed: 0,
            failed_matches: HashSet::new(),
        })
    }

    /// Runs the crawl loop until the row ceiling or frontier exhaustion
    ///
    /// Failed remote lookups are logged and skipped. Only output errors
    /// abort the run.
    pub async fn run(&mut self) -> Result<HarvestStatistics, HarvestError> {
        let start_time = Instant::now();
        tracing::info!(
            "Starting harvest from {} (ceiling {} records, {:?})",
            self.crawl.initial_puuid,
            self.crawl.max_rows,
            self.crawl.ceiling_policy
        );

        while !self.update_state().is_terminal() {
            let Some(puuid) = self.frontier.pop_player() else {
                break;
            };
            self.harvest_player(&puuid, start_time).await?;
        }

        self.writer.finish(&self.records)?;
        let state = self.update_state();

        tracing::info!(
            "Harvest {}: {} records from {} matches in {:?}",
            state,
            self.records.len(),
            self.matches_processed,
            start_time.elapsed()
        );

        Ok(HarvestStatistics {
            records: self.records.len(),
            matches_processed: self.matches_processed,
            matches_failed: self.failed_matches.len(),
            players_explored: self.players_explored,
            players_abandoned: self.players_abandoned,
            players_pending: self.frontier.pending_len(),
            players_known: self.frontier.known_players(),
            artifacts_written: self.writer.artifacts_written(),
            last_artifact: self.writer.last_artifact().map(|p| p.to_path_buf()),
            stop_reason: state.stop_reason(),
            elapsed: start_time.elapsed(),
            fetch: self.api.fetch_stats().unwrap_or_default(),
            cache: self.cache.stats(),
        })
    }

    /// Explores one player's recent matches
    async fn harvest_player(&mut self, puuid: &str, start_time: Instant) -> Result<(), HarvestError> {
        self.players_explored += 1;

        let match_ids = match self
            .api
            .match_ids_by_puuid(puuid, self.crawl.match_history_count)
            .await
        {
            Ok(ids) if !ids.is_empty() => ids,
            Ok(_) => {
                tracing::warn!("No matches found for player {}", puuid);
                self.players_abandoned += 1;
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Match history for player {} unavailable: {}", puuid, e);
                self.players_abandoned += 1;
                return Ok(());
            }
        };

        tracing::debug!("Player {}: {} matches listed", puuid, match_ids.len());

        for match_id in &match_ids {
            if self.ceiling_reached() {
                break;
            }
            if self.frontier.is_match_seen(match_id) {
                continue;
            }
            self.harvest_match(match_id, start_time).await?;
        }

        Ok(())
    }

    /// Fetches, enriches and appends one unseen match
    async fn harvest_match(&mut self, match_id: &str, start_time: Instant) -> Result<(), HarvestError> {
        let detail = self.cache.match_detail(&self.api, match_id).await;
        let Some(detail) = detail.filter(|payload| payload.get("info").is_some()) else {
            if self.failed_matches.insert(match_id.to_string()) {
                tracing::warn!("Match {} skipped: no usable details", match_id);
            }
            return Ok(());
        };
        self.frontier.mark_match_seen(match_id);

        let timeline = self.cache.match_timeline(&self.api, match_id).await;
        let records = enrich(
            &self.api,
            &mut self.cache,
            &mut self.frontier,
            Some(detail.as_ref()),
            timeline.as_deref(),
        )
        .await;

        tracing::debug!(
            "Match {}: {} records, {} players pending",
            match_id,
            records.len(),
            self.frontier.pending_len()
        );

        self.matches_processed += 1;
        self.append_records(records, start_time)
    }

    /// Appends a match's records, flushing on the chunk cadence
    fn append_records(
        &mut self,
        records: Vec<FlatRecord>,
        start_time: Instant,
    ) -> Result<(), HarvestError> {
        for record in records {
            if self.crawl.ceiling_policy == CeilingPolicy::PerRecord && self.ceiling_reached() {
                break;
            }
            self.records.push(record);

            let total = self.records.len();
            if self.writer.should_flush(total) {
                self.writer.flush(&self.records)?;
            }

            if self.crawl.progress_interval > 0 && total % self.crawl.progress_interval == 0 {
                let rate = total as f64 / start_time.elapsed().as_secs_f64().max(f64::EPSILON);
                tracing::info!(
                    "Progress: {} records, {} matches, {} players pending, {:.2} records/sec",
                    total,
                    self.matches_processed,
                    self.frontier.pending_len(),
                    rate
                );
            }
        }
        Ok(())
    }

    fn ceiling_reached(&self) -> bool {
        self.records.len() >= self.crawl.max_rows
    }

    fn update_state(&mut self) -> RunState {
        self.state = RunState::evaluate(
            self.records.len(),
            self.crawl.max_rows,
            self.frontier.pending_len(),
        );
        self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    pub fn state(&self) -> RunState {
        self.state
    }
}
