//! Process-lifetime memo of remote lookups
//!
//! Four independent key spaces (match detail, match timeline, rank, mastery).
//! Each key is fetched at most once per run; a failed fetch is stored as a
//! negative value and never retried.

use crate::api::MatchApi;
use crate::model::{MasteryInfo, MasteryMap, RankInfo};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Hit/miss counters of one key space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySpaceStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Write-once map from key to fetched value
#[derive(Debug)]
pub struct KeySpace<V> {
    entries: HashMap<String, V>,
    hits: u64,
    misses: u64,
}

impl<V> Default for KeySpace<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<V> KeySpace<V> {
    /// Returns the stored value for `key`, running `fetch` once on a miss
    pub async fn get_or_fetch<F, Fut>(&mut self, key: &str, fetch: F) -> &V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if self.entries.contains_key(key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let value = fetch().await;
            self.entries.insert(key.to_string(), value);
        }
        &self.entries[key]
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> KeySpaceStats {
        KeySpaceStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

/// Counters for all four key spaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub match_details: KeySpaceStats,
    pub match_timelines: KeySpaceStats,
    pub ranks: KeySpaceStats,
    pub masteries: KeySpaceStats,
}

/// Response cache owned by one harvest run
#[derive(Debug, Default)]
pub struct ResponseCache {
    match_details: KeySpace<Option<Arc<Value>>>,
    match_timelines: KeySpace<Option<Arc<Value>>>,
    ranks: KeySpace<RankInfo>,
    masteries: KeySpace<MasteryMap>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match payload, or None if it could not be fetched
    pub async fn match_detail<A>(&mut self, api: &A, match_id: &str) -> Option<Arc<Value>>
    where
        A: MatchApi + ?Sized,
    {
        self.match_details
            .get_or_fetch(match_id, move || async move {
                match api.match_detail(match_id).await {
                    Ok(payload) => Some(Arc::new(payload)),
                    Err(e) => {
                        tracing::warn!("Match details for {} unavailable: {}", match_id, e);
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// Timeline payload, or None if it could not be fetched
    pub async fn match_timeline<A>(&mut self, api: &A, match_id: &str) -> Option<Arc<Value>>
    where
        A: MatchApi + ?Sized,
    {
        self.match_timelines
            .get_or_fetch(match_id, move || async move {
                match api.match_timeline(match_id).await {
                    Ok(payload) => Some(Arc::new(payload)),
                    Err(e) => {
                        tracing::warn!("Match timeline for {} unavailable: {}", match_id, e);
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// Standings for a summoner on a platform
    ///
    /// A missing or empty summoner id or platform yields an empty RankInfo
    /// without a fetch and without a cache entry.
    pub async fn rank<A>(
        &mut self,
        api: &A,
        summoner_id: Option<&str>,
        platform: Option<&str>,
    ) -> RankInfo
    where
        A: MatchApi + ?Sized,
    {
        let summoner_id = summoner_id.filter(|s| !s.is_empty());
        let platform = platform.filter(|p| !p.is_empty());
        let (Some(summoner_id), Some(platform)) = (summoner_id, platform) else {
            return RankInfo::empty();
        };

        let key = format!("{}:{}", platform, summoner_id);
        self.ranks
            .get_or_fetch(&key, move || async move {
                match api.league_entries(summoner_id, platform).await {
                    Ok(entries) => RankInfo::from_entries(&entries),
                    Err(e) => {
                        tracing::warn!("Rank for {} on {} unavailable: {}", summoner_id, platform, e);
                        RankInfo::empty()
                    }
                }
            })
            .await
            .clone()
    }

    /// Mastery of a player on one champion
    ///
    /// The player's whole mastery list is fetched on first use; later
    /// champions for the same player are served from it. A champion the
    /// player has no entry for yields an empty MasteryInfo.
    pub async fn mastery<A>(
        &mut self,
        api: &A,
        puuid: Option<&str>,
        champion_id: Option<i64>,
        platform: Option<&str>,
    ) -> MasteryInfo
    where
        A: MatchApi + ?Sized,
    {
        let puuid = puuid.filter(|p| !p.is_empty());
        let (Some(puuid), Some(champion_id)) = (puuid, champion_id) else {
            return MasteryInfo::empty();
        };

        let masteries = self
            .masteries
            .get_or_fetch(puuid, move || async move {
                match api.champion_masteries(puuid, platform).await {
                    Ok(entries) => MasteryInfo::map_from_entries(&entries),
                    Err(e) => {
                        tracing::warn!("Champion mastery for {} unavailable: {}", puuid, e);
                        MasteryMap::new()
                    }
                }
            })
            .await;

        masteries.get(&champion_id).cloned().unwrap_or_default()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            match_details: self.match_details.stats(),
            match_timelines: self.match_timelines.stats(),
            ranks: self.ranks.stats(),
            masteries: self.masteries.stats(),
        }
    }
}
