//! Scripted in-memory [`MatchApi`] for unit tests

use crate::api::MatchApi;
use crate::fetch::FetchError;
use crate::model::{ChampionMastery, LeagueEntry};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves fixed data and records every call as `"<op>:<key>"`
#[derive(Default)]
pub struct StubApi {
    pub histories: HashMap<String, Vec<String>>,
    pub matches: HashMap<String, Value>,
    pub timelines: HashMap<String, Value>,
    pub leagues: HashMap<String, Vec<LeagueEntry>>,
    pub masteries: HashMap<String, Vec<ChampionMastery>>,
    calls: Mutex<Vec<String>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a match and makes it appear in each participant's history
    pub fn add_match(&mut self, match_id: &str, participants: &[&str]) {
        self.matches.insert(
            match_id.to_string(),
            match_payload(match_id, "EUW1", participants),
        );
        for puuid in participants {
            self.histories
                .entry(puuid.to_string())
                .or_default()
                .push(match_id.to_string());
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose record starts with `prefix`
    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn not_found(key: &str) -> FetchError {
    FetchError::Status {
        url: format!("stub://{}", key),
        status: 404,
    }
}

/// Minimal match payload; participant i gets summoner `S-<puuid>` and champion 100+i
pub fn match_payload(match_id: &str, platform: &str, participants: &[&str]) -> Value {
    let participants: Vec<Value> = participants
        .iter()
        .enumerate()
        .map(|(i, puuid)| {
            json!({
                "participantId": i + 1,
                "puuid": puuid,
                "summonerName": format!("name-{}", puuid),
                "summonerId": format!("S-{}", puuid),
                "championId": 100 + i as i64,
                "championName": "Ahri",
                "teamId": if i < 5 { 100 } else { 200 },
                "win": i < 5,
                "kills": i,
                "deaths": 1,
                "assists": 2,
            })
        })
        .collect();

    json!({
        "metadata": { "matchId": match_id },
        "info": {
            "gameId": 42,
            "gameDuration": 1800,
            "gameMode": "CLASSIC",
            "gameType": "MATCHED_GAME",
            "gameVersion": "14.1.1",
            "mapId": 11,
            "queueId": 420,
            "platformId": platform,
            "gameStartTimestamp": 1_700_000_000_000_i64,
            "participants": participants,
        }
    })
}

#[async_trait]
impl MatchApi for StubApi {
    async fn match_ids_by_puuid(
        &self,
        puuid: &str,
        count: u32,
    ) -> Result<Vec<String>, FetchError> {
        self.record(format!("history:{}", puuid));
        self.histories
            .get(puuid)
            .map(|ids| ids.iter().take(count as usize).cloned().collect())
            .ok_or_else(|| not_found(puuid))
    }

    async fn match_detail(&self, match_id: &str) -> Result<Value, FetchError> {
        self.record(format!("detail:{}", match_id));
        self.matches
            .get(match_id)
            .cloned()
            .ok_or_else(|| not_found(match_id))
    }

    async fn match_timeline(&self, match_id: &str) -> Result<Value, FetchError> {
        self.record(format!("timeline:{}", match_id));
        self.timelines
            .get(match_id)
            .cloned()
            .ok_or_else(|| not_found(match_id))
    }

    async fn league_entries(
        &self,
        summoner_id: &str,
        platform: &str,
    ) -> Result<Vec<LeagueEntry>, FetchError> {
        self.record(format!("league:{}:{}", platform, summoner_id));
        self.leagues
            .get(summoner_id)
            .cloned()
            .ok_or_else(|| not_found(summoner_id))
    }

    async fn champion_masteries(
        &self,
        puuid: &str,
        _platform: Option<&str>,
    ) -> Result<Vec<ChampionMastery>, FetchError> {
        self.record(format!("mastery:{}", puuid));
        self.masteries
            .get(puuid)
            .cloned()
            .ok_or_else(|| not_found(puuid))
    }
}
